//! Integration tests for vg-graph.

use vg_graph::{VgError, Virus, VirusGenealogy};

#[derive(Debug)]
struct Sample {
    id: String,
}

impl Virus for Sample {
    type Id = String;

    fn new(id: &String) -> Self {
        Sample { id: id.clone() }
    }

    fn id(&self) -> String {
        self.id.clone()
    }
}

fn s(id: &str) -> String {
    id.to_string()
}

fn ids(list: &[&str]) -> Vec<String> {
    list.iter().map(|id| id.to_string()).collect()
}

#[test]
fn single_and_multi_parent_creation() {
    let mut g: VirusGenealogy<Sample> = VirusGenealogy::new(&s("A"));

    g.create(&s("B"), &s("A")).unwrap();
    assert_eq!(g.children_of(&s("A")).unwrap(), ids(&["B"]));
    assert_eq!(g.parents_of(&s("B")).unwrap(), ids(&["A"]));

    g.create_multi(&s("C"), &ids(&["A", "B"])).unwrap();
    assert_eq!(g.parents_of(&s("C")).unwrap(), ids(&["A", "B"]));
    assert_eq!(g.children_of(&s("B")).unwrap(), ids(&["C"]));
    g.validate().unwrap();
}

#[test]
fn removing_a_middle_virus() {
    let mut g: VirusGenealogy<Sample> = VirusGenealogy::new(&s("A"));
    g.create(&s("B"), &s("A")).unwrap();
    g.create_multi(&s("C"), &ids(&["A", "B"])).unwrap();

    g.remove(&s("B")).unwrap();

    assert!(!g.exists(&s("B")));
    assert_eq!(g.children_of(&s("A")).unwrap(), ids(&["C"]));
    assert_eq!(g.parents_of(&s("C")).unwrap(), ids(&["A"]));
    assert!(matches!(g.get(&s("B")), Err(VgError::NotFound { .. })));

    // A already parents C.
    g.connect(&s("C"), &s("A")).unwrap();
    assert_eq!(g.children_of(&s("A")).unwrap(), ids(&["C"]));
    assert_eq!(g.parents_of(&s("C")).unwrap(), ids(&["A"]));
    g.validate().unwrap();
}

#[test]
fn creating_under_unknown_parent() {
    let mut g: VirusGenealogy<Sample> = VirusGenealogy::new(&s("A"));
    let err = g.create(&s("D"), &s("Z")).unwrap_err();
    assert!(matches!(err, VgError::NotFound { .. }));
    assert!(!g.exists(&s("D")));
    assert_eq!(g.len(), 1);
}

#[test]
fn stem_is_permanent() {
    let mut g: VirusGenealogy<Sample> = VirusGenealogy::new(&s("root"));
    g.create(&s("x"), &s("root")).unwrap();

    let err = g.remove(&g.stem_id()).unwrap_err();
    assert!(matches!(err, VgError::CannotRemoveStem { .. }));
    assert_eq!(err.to_string(), "Tried to remove stem virus: \"root\"");
    assert_eq!(g.children_of(&s("root")).unwrap(), ids(&["x"]));
}

#[test]
fn queries_on_missing_ids() {
    let g: VirusGenealogy<Sample> = VirusGenealogy::new(&s("A"));
    assert!(matches!(g.children_of(&s("Q")), Err(VgError::NotFound { .. })));
    assert!(matches!(g.parents_of(&s("Q")), Err(VgError::NotFound { .. })));
    assert!(matches!(g.get(&s("Q")), Err(VgError::NotFound { .. })));
}

#[test]
fn diamond_survives_losing_one_side() {
    // A -> B -> D, A -> C -> D
    let mut g: VirusGenealogy<Sample> = VirusGenealogy::new(&s("A"));
    g.create(&s("B"), &s("A")).unwrap();
    g.create(&s("C"), &s("A")).unwrap();
    g.create_multi(&s("D"), &ids(&["B", "C"])).unwrap();
    g.create(&s("E"), &s("D")).unwrap();

    g.remove(&s("B")).unwrap();
    assert_eq!(g.parents_of(&s("D")).unwrap(), ids(&["C"]));
    assert!(g.exists(&s("E")));

    g.remove(&s("C")).unwrap();
    assert_eq!(g.ids().cloned().collect::<Vec<_>>(), ids(&["A"]));
    g.validate().unwrap();
}

#[test]
fn wide_genealogy() {
    let mut g: VirusGenealogy<Sample> = VirusGenealogy::new(&s("stem"));
    let mut previous = s("stem");
    for i in 0..100 {
        let id = format!("v{:03}", i);
        g.create_multi(&id, &[s("stem"), previous.clone()]).unwrap();
        previous = id;
    }
    assert_eq!(g.len(), 101);
    assert_eq!(g.children_of(&s("stem")).unwrap().len(), 100);
    g.validate().unwrap();

    for i in (0..100).step_by(2) {
        g.remove(&format!("v{:03}", i)).unwrap();
    }
    assert_eq!(g.len(), 51);
    assert_eq!(g.parents_of(&s("v051")).unwrap(), ids(&["stem"]));
    g.validate().unwrap();
}

#[test]
fn cycles_are_representable_and_collectable() {
    let mut g: VirusGenealogy<Sample> = VirusGenealogy::new(&s("A"));
    g.create(&s("B"), &s("A")).unwrap();
    g.create(&s("C"), &s("B")).unwrap();
    g.connect(&s("B"), &s("C")).unwrap();

    assert_eq!(g.parents_of(&s("B")).unwrap(), ids(&["A", "C"]));
    assert_eq!(g.children_of(&s("C")).unwrap(), ids(&["B"]));
    g.validate().unwrap();

    g.remove(&s("C")).unwrap();
    assert_eq!(g.parents_of(&s("B")).unwrap(), ids(&["A"]));
    assert!(g.children_of(&s("B")).unwrap().is_empty());
    g.validate().unwrap();
}
