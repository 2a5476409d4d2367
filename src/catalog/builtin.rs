use super::{Catalog, ProjectRecord, RosterEntry, TeamRecord};

pub(super) fn builtin_catalog() -> Catalog {
    Catalog {
        organizations: ["Acme", "Globex", "Initech"]
            .iter()
            .map(|org| (*org).to_string())
            .collect(),
        projects: vec![
            ProjectRecord::new("PROJ1", Some("Payments Platform")),
            ProjectRecord::new("PROJ2", Some("Mobile App")),
            ProjectRecord::new("PROJ3", Some("Data Warehouse")),
            ProjectRecord::new("OPS", None),
        ],
        teams: vec![
            TeamRecord::new(
                "Platform",
                vec![
                    RosterEntry::new("Alice", Some("NYC")),
                    RosterEntry::new("Bob", None),
                ],
            ),
            TeamRecord::new(
                "Mobile",
                vec![
                    RosterEntry::new("Carol", Some("London")),
                    RosterEntry::new("Dan", Some("Berlin")),
                ],
            ),
            TeamRecord::new(
                "Data",
                vec![
                    RosterEntry::new("Erin", Some("Austin")),
                    RosterEntry::new("Frank", None),
                    RosterEntry::new("Grace", Some("Toronto")),
                ],
            ),
            TeamRecord::new("Security", vec![RosterEntry::new("Heidi", Some("Remote"))]),
        ],
    }
}
