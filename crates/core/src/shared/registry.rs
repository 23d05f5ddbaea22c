/// Whether a safety object category currently needs attention.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ObjectStatus {
    Normal,
    Critical,
}

/// Static sidebar reference data: one entry per trained object category.
/// Not derived from detections.
#[derive(Clone, Copy, Debug)]
pub struct SafetyObject {
    pub name: &'static str,
    pub icon: &'static str,
    pub status: ObjectStatus,
}

pub const SAFETY_OBJECTS: &[SafetyObject] = &[
    SafetyObject {
        name: "OxygenTank",
        icon: "\u{1FAE7}",
        status: ObjectStatus::Normal,
    },
    SafetyObject {
        name: "NitrogenTank",
        icon: "\u{2744}",
        status: ObjectStatus::Normal,
    },
    SafetyObject {
        name: "FirstAidBox",
        icon: "\u{1F3E5}",
        status: ObjectStatus::Critical,
    },
    SafetyObject {
        name: "FireAlarm",
        icon: "\u{1F514}",
        status: ObjectStatus::Normal,
    },
    SafetyObject {
        name: "SafetySwitchPanel",
        icon: "\u{26A1}",
        status: ObjectStatus::Normal,
    },
    SafetyObject {
        name: "EmergencyPhone",
        icon: "\u{1F4DE}",
        status: ObjectStatus::Normal,
    },
    SafetyObject {
        name: "FireExtinguisher",
        icon: "\u{1F9EF}",
        status: ObjectStatus::Normal,
    },
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_registry_has_seven_unique_categories() {
        assert_eq!(SAFETY_OBJECTS.len(), 7);
        let names: HashSet<&str> = SAFETY_OBJECTS.iter().map(|o| o.name).collect();
        assert_eq!(names.len(), 7);
    }

    #[test]
    fn test_first_aid_box_is_the_critical_entry() {
        let critical: Vec<&str> = SAFETY_OBJECTS
            .iter()
            .filter(|o| o.status == ObjectStatus::Critical)
            .map(|o| o.name)
            .collect();
        assert_eq!(critical, vec!["FirstAidBox"]);
    }
}
