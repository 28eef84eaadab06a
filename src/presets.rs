//! Built-in training presets

use serde::Serialize;

/// Discipline a preset is modelled on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PresetKind {
    Boxing,
    Mma,
    Tabata,
}

/// Named work/rest/rounds combination
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Preset {
    pub id: &'static str,
    pub name: &'static str,
    pub kind: PresetKind,
    pub work_seconds: u64,
    pub rest_seconds: u64,
    pub rounds: u32,
    pub description: &'static str,
}

pub const PRESETS: &[Preset] = &[
    Preset {
        id: "boxing-3min",
        name: "Boxing Round",
        kind: PresetKind::Boxing,
        work_seconds: 180,
        rest_seconds: 60,
        rounds: 12,
        description: "3 minutes work, 1 minute rest",
    },
    Preset {
        id: "mma-5min",
        name: "MMA Round",
        kind: PresetKind::Mma,
        work_seconds: 300,
        rest_seconds: 60,
        rounds: 5,
        description: "5 minutes work, 1 minute rest",
    },
    Preset {
        id: "tabata-20s",
        name: "Tabata",
        kind: PresetKind::Tabata,
        work_seconds: 20,
        rest_seconds: 10,
        rounds: 8,
        description: "20 seconds work, 10 seconds rest",
    },
    Preset {
        id: "muay-thai-3min",
        name: "Muay Thai",
        kind: PresetKind::Boxing,
        work_seconds: 180,
        rest_seconds: 120,
        rounds: 5,
        description: "3 minutes work, 2 minutes rest",
    },
    Preset {
        id: "bjj-5min",
        name: "BJJ Rolling",
        kind: PresetKind::Mma,
        work_seconds: 300,
        rest_seconds: 60,
        rounds: 6,
        description: "5 minutes rolling, 1 minute rest",
    },
    Preset {
        id: "hiit-30s",
        name: "HIIT",
        kind: PresetKind::Tabata,
        work_seconds: 30,
        rest_seconds: 30,
        rounds: 10,
        description: "30 seconds work, 30 seconds rest",
    },
];

/// Look up a preset by id, ignoring ASCII case
pub fn find(id: &str) -> Option<&'static Preset> {
    PRESETS.iter().find(|p| p.id.eq_ignore_ascii_case(id))
}

/// Ids of every preset, for error messages and help text
pub fn ids() -> Vec<&'static str> {
    PRESETS.iter().map(|p| p.id).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_preset_case_insensitively() {
        let preset = find("Tabata-20S").unwrap();
        assert_eq!(preset.work_seconds, 20);
        assert_eq!(preset.rest_seconds, 10);
        assert_eq!(preset.rounds, 8);
    }

    #[test]
    fn unknown_preset_is_none() {
        assert!(find("kickboxing").is_none());
    }

    #[test]
    fn ids_are_unique() {
        let mut ids = ids();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), PRESETS.len());
    }
}
