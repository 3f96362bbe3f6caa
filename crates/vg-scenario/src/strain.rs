use vg_core::Virus;

/// Virus identified by a plain string, used when replaying scenario files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Strain {
    id: String,
}

impl Virus for Strain {
    type Id = String;

    fn new(id: &String) -> Self {
        Strain { id: id.clone() }
    }

    fn id(&self) -> String {
        self.id.clone()
    }
}
