//! Static subject catalog.
//!
//! Subjects are a fixed editorial taxonomy, not user data: materials
//! reference a subject by id, and validation rejects ids outside this list.

use serde::Serialize;

/// One entry in the subject catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Subject {
    /// Stable id referenced by material records
    pub id: &'static str,
    /// Display name
    pub name: &'static str,
    /// Short blurb shown on browsing pages
    pub description: &'static str,
    /// Number of syllabus chapters (0 where not chapter-structured)
    pub chapters: u32,
}

/// The full catalog, in display order.
pub fn catalog() -> &'static [Subject] {
    &[
        Subject {
            id: "physics",
            name: "Physics",
            description:
                "Master the concepts of mechanics, thermodynamics, electricity, and more.",
            chapters: 10,
        },
        Subject {
            id: "chemistry",
            name: "Chemistry",
            description: "Explore organic, inorganic, and physical chemistry principles.",
            chapters: 12,
        },
        Subject {
            id: "biology",
            name: "Biology",
            description: "Delve into the study of life, from molecular biology to ecology.",
            chapters: 15,
        },
        Subject {
            id: "counselling",
            name: "Counselling",
            description: "Guidance and support materials for your exam journey.",
            chapters: 0,
        },
        Subject {
            id: "other",
            name: "Other",
            description: "Miscellaneous materials and other useful resources.",
            chapters: 0,
        },
    ]
}

/// Look up a subject by id.
pub fn find(id: &str) -> Option<&'static Subject> {
    catalog().iter().find(|s| s.id == id)
}

/// Check whether an id names a catalog subject.
pub fn is_valid(id: &str) -> bool {
    find(id).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_has_five_subjects() {
        assert_eq!(catalog().len(), 5);
    }

    #[test]
    fn test_find_known_subject() {
        let physics = find("physics").unwrap();
        assert_eq!(physics.name, "Physics");
        assert_eq!(physics.chapters, 10);
    }

    #[test]
    fn test_find_unknown_subject() {
        assert!(find("astrology").is_none());
        assert!(!is_valid("astrology"));
    }

    #[test]
    fn test_ids_are_unique() {
        let mut ids: Vec<_> = catalog().iter().map(|s| s.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), catalog().len());
    }

    #[test]
    fn test_subject_serializes_for_json_output() {
        let json = serde_json::to_string(find("other").unwrap()).unwrap();
        assert!(json.contains("\"id\":\"other\""));
        assert!(json.contains("\"chapters\":0"));
    }
}
