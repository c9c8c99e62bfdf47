use crate::error::{Result, ShowDesignError};
use crate::field::Field;
use crate::types::DraftStatus;
use chrono::{Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

pub type DraftId = i64;
pub type SceneId = i64;

// ---------------------------------------------------------------------------
// Scene
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scene {
    pub id: SceneId,
    #[serde(default)]
    pub desc: String,
}

// ---------------------------------------------------------------------------
// Draft
// ---------------------------------------------------------------------------

/// One show design, as persisted in the drafts collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Draft {
    pub id: DraftId,
    #[serde(default, deserialize_with = "lenient::opt_number")]
    pub year: Option<i32>,
    #[serde(default)]
    pub status: DraftStatus,
    #[serde(default)]
    pub signed: bool,
    #[serde(default, deserialize_with = "lenient::opt_number")]
    pub band_size: Option<u32>,
    #[serde(default)]
    pub instrumentation: String,
    #[serde(default)]
    pub strongest_sections: String,
    #[serde(default)]
    pub weakest_sections: String,
    #[serde(default)]
    pub includes: String,
    #[serde(default)]
    pub avoids: String,
    #[serde(default, deserialize_with = "lenient::opt_date")]
    pub date_needed: Option<NaiveDate>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub synopsis: String,
    #[serde(default)]
    pub narrative: String,
    #[serde(default)]
    pub mood: String,
    #[serde(default)]
    pub soloists: String,
    #[serde(default)]
    pub big_moment: String,
    #[serde(default)]
    pub scenes: Vec<Scene>,
    #[serde(default)]
    pub songs: String,
}

impl Draft {
    pub fn new(id: DraftId, year: i32) -> Self {
        Self {
            id,
            year: Some(year),
            status: DraftStatus::Draft,
            signed: false,
            band_size: None,
            instrumentation: String::new(),
            strongest_sections: String::new(),
            weakest_sections: String::new(),
            includes: String::new(),
            avoids: String::new(),
            date_needed: None,
            title: String::new(),
            synopsis: String::new(),
            narrative: String::new(),
            mood: String::new(),
            soloists: String::new(),
            big_moment: String::new(),
            scenes: Vec::new(),
            songs: String::new(),
        }
    }

    /// A blank draft identified by the current time, for the current season.
    pub fn fresh() -> Self {
        let now = Utc::now();
        Self::new(now.timestamp_millis(), now.year())
    }

    pub fn is_locked(&self) -> bool {
        self.status == DraftStatus::Locked
    }

    // ---------------------------------------------------------------------------
    // Field access
    // ---------------------------------------------------------------------------

    /// Display form of a field; unset values render as the empty string.
    pub fn get(&self, field: Field) -> String {
        match field {
            Field::Year => self.year.map(|y| y.to_string()).unwrap_or_default(),
            Field::BandSize => self.band_size.map(|n| n.to_string()).unwrap_or_default(),
            Field::DateNeeded => self
                .date_needed
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
            text => self.text(text).map(str::to_string).unwrap_or_default(),
        }
    }

    /// Set a field from user input. Empty input unsets optional fields.
    pub fn set(&mut self, field: Field, value: &str) -> Result<()> {
        match field {
            Field::Year => self.year = parse_opt(field, value)?,
            Field::BandSize => self.band_size = parse_opt(field, value)?,
            Field::DateNeeded => {
                let value = value.trim();
                self.date_needed = if value.is_empty() {
                    None
                } else {
                    Some(NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| {
                        ShowDesignError::InvalidValue {
                            field: field.to_string(),
                            reason: format!("'{value}' is not a YYYY-MM-DD date"),
                        }
                    })?)
                };
            }
            text => {
                if let Some(slot) = self.text_mut(text) {
                    *slot = value.to_string();
                }
            }
        }
        Ok(())
    }

    pub fn clear(&mut self, field: Field) {
        match field {
            Field::Year => self.year = None,
            Field::BandSize => self.band_size = None,
            Field::DateNeeded => self.date_needed = None,
            text => {
                if let Some(slot) = self.text_mut(text) {
                    slot.clear();
                }
            }
        }
    }

    fn text(&self, field: Field) -> Option<&str> {
        let s = match field {
            Field::Instrumentation => &self.instrumentation,
            Field::StrongestSections => &self.strongest_sections,
            Field::WeakestSections => &self.weakest_sections,
            Field::Includes => &self.includes,
            Field::Avoids => &self.avoids,
            Field::Title => &self.title,
            Field::Synopsis => &self.synopsis,
            Field::Narrative => &self.narrative,
            Field::Mood => &self.mood,
            Field::Soloists => &self.soloists,
            Field::BigMoment => &self.big_moment,
            Field::Songs => &self.songs,
            Field::Year | Field::BandSize | Field::DateNeeded => return None,
        };
        Some(s)
    }

    fn text_mut(&mut self, field: Field) -> Option<&mut String> {
        let s = match field {
            Field::Instrumentation => &mut self.instrumentation,
            Field::StrongestSections => &mut self.strongest_sections,
            Field::WeakestSections => &mut self.weakest_sections,
            Field::Includes => &mut self.includes,
            Field::Avoids => &mut self.avoids,
            Field::Title => &mut self.title,
            Field::Synopsis => &mut self.synopsis,
            Field::Narrative => &mut self.narrative,
            Field::Mood => &mut self.mood,
            Field::Soloists => &mut self.soloists,
            Field::BigMoment => &mut self.big_moment,
            Field::Songs => &mut self.songs,
            Field::Year | Field::BandSize | Field::DateNeeded => return None,
        };
        Some(s)
    }

    // ---------------------------------------------------------------------------
    // Scenes
    // ---------------------------------------------------------------------------

    /// Append an empty scene and return its id.
    pub fn add_scene(&mut self) -> SceneId {
        self.add_scene_at(Utc::now().timestamp_millis())
    }

    /// Append an empty scene whose id derives from `now_ms`, bumped past every
    /// existing id so rapid additions never collide. If the id space above the
    /// existing scenes is exhausted, the lowest unused id is taken instead.
    pub fn add_scene_at(&mut self, now_ms: i64) -> SceneId {
        let next = match self.scenes.iter().map(|s| s.id).max() {
            Some(max) => now_ms.max(max.saturating_add(1)),
            None => now_ms,
        };
        let id = if self.has_scene(next) {
            self.lowest_free_scene_id()
        } else {
            next
        };
        self.scenes.push(Scene {
            id,
            desc: String::new(),
        });
        id
    }

    pub fn update_scene(&mut self, id: SceneId, desc: impl Into<String>) -> Result<()> {
        let scene = self
            .scenes
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or(ShowDesignError::SceneNotFound(id))?;
        scene.desc = desc.into();
        Ok(())
    }

    pub fn remove_scene(&mut self, id: SceneId) -> Result<()> {
        let pos = self
            .scenes
            .iter()
            .position(|s| s.id == id)
            .ok_or(ShowDesignError::SceneNotFound(id))?;
        self.scenes.remove(pos);
        Ok(())
    }

    fn has_scene(&self, id: SceneId) -> bool {
        self.scenes.iter().any(|s| s.id == id)
    }

    fn lowest_free_scene_id(&self) -> SceneId {
        let mut id = 0;
        while self.has_scene(id) {
            id += 1;
        }
        id
    }
}

fn parse_opt<T: std::str::FromStr>(field: Field, value: &str) -> Result<Option<T>> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(None);
    }
    value
        .parse::<T>()
        .map(Some)
        .map_err(|_| ShowDesignError::InvalidValue {
            field: field.to_string(),
            reason: format!("'{value}' is not a whole number"),
        })
}

// ---------------------------------------------------------------------------
// Lenient deserializers
// ---------------------------------------------------------------------------

/// Older blobs store numeric inputs as strings, use `""` for unset values,
/// and may hold whatever a browser number input accepted (`"12.5"`, `"-3"`).
/// Values that do not fit the field load as unset rather than failing the
/// whole record.
mod lenient {
    use chrono::NaiveDate;
    use serde::de::IgnoredAny;
    use serde::{Deserialize, Deserializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Int(i64),
        Float(f64),
        Text(String),
        Other(#[allow(dead_code)] IgnoredAny),
    }

    fn whole<T: TryFrom<i64>>(f: f64) -> Option<T> {
        if f.is_finite() && f.fract() == 0.0 && f >= i64::MIN as f64 && f <= i64::MAX as f64 {
            T::try_from(f as i64).ok()
        } else {
            None
        }
    }

    pub fn opt_number<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
    where
        D: Deserializer<'de>,
        T: TryFrom<i64> + std::str::FromStr,
    {
        let value = match Option::<Raw>::deserialize(deserializer)? {
            None | Some(Raw::Other(_)) => None,
            Some(Raw::Int(n)) => T::try_from(n).ok(),
            Some(Raw::Float(f)) => whole(f),
            Some(Raw::Text(s)) => {
                let s = s.trim();
                s.parse::<T>()
                    .ok()
                    .or_else(|| s.parse::<f64>().ok().and_then(whole))
            }
        };
        Ok(value)
    }

    pub fn opt_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = match Option::<Raw>::deserialize(deserializer)? {
            Some(Raw::Text(s)) => NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok(),
            _ => None,
        };
        Ok(value)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_draft_is_blank() {
        let d = Draft::new(7, 2025);
        assert_eq!(d.id, 7);
        assert_eq!(d.year, Some(2025));
        assert_eq!(d.status, DraftStatus::Draft);
        assert!(!d.signed);
        assert!(d.scenes.is_empty());
        assert!(d.title.is_empty());
    }

    #[test]
    fn set_and_get_fields() {
        let mut d = Draft::new(1, 2025);
        d.set(Field::Title, "Echoes").unwrap();
        d.set(Field::BandSize, " 120 ").unwrap();
        d.set(Field::DateNeeded, "2025-06-01").unwrap();
        assert_eq!(d.get(Field::Title), "Echoes");
        assert_eq!(d.band_size, Some(120));
        assert_eq!(d.get(Field::DateNeeded), "2025-06-01");

        d.set(Field::BandSize, "").unwrap();
        assert_eq!(d.band_size, None);
        d.clear(Field::Title);
        assert!(d.title.is_empty());
    }

    #[test]
    fn set_rejects_malformed_numbers_and_dates() {
        let mut d = Draft::new(1, 2025);
        assert!(matches!(
            d.set(Field::BandSize, "lots"),
            Err(ShowDesignError::InvalidValue { .. })
        ));
        assert!(d.set(Field::DateNeeded, "06/01/2025").is_err());
        assert_eq!(d.band_size, None);
        assert_eq!(d.date_needed, None);
    }

    #[test]
    fn add_scene_assigns_distinct_ids() {
        let mut d = Draft::new(1, 2025);
        let a = d.add_scene_at(1000);
        let b = d.add_scene_at(1000);
        let c = d.add_scene_at(500);
        assert_eq!(d.scenes.len(), 3);
        assert_eq!(a, 1000);
        assert_eq!(b, 1001);
        assert_eq!(c, 1002);
        assert!(d.scenes.iter().all(|s| s.desc.is_empty()));
    }

    #[test]
    fn update_and_remove_scene_by_id() {
        let mut d = Draft::new(1, 2025);
        let a = d.add_scene_at(10);
        let b = d.add_scene_at(11);
        let c = d.add_scene_at(12);
        d.update_scene(b, "Brass fanfare").unwrap();
        assert_eq!(d.scenes[1].desc, "Brass fanfare");

        d.remove_scene(b).unwrap();
        let ids: Vec<_> = d.scenes.iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![a, c]);

        assert!(matches!(
            d.remove_scene(b),
            Err(ShowDesignError::SceneNotFound(_))
        ));
        assert!(d.update_scene(999, "x").is_err());
    }

    #[test]
    fn serializes_with_camel_case_keys() {
        let mut d = Draft::new(42, 2025);
        d.set(Field::BigMoment, "Company front").unwrap();
        let v = serde_json::to_value(&d).unwrap();
        assert_eq!(v["id"], 42);
        assert_eq!(v["bigMoment"], "Company front");
        assert_eq!(v["status"], "draft");
        assert!(v.get("strongestSections").is_some());
    }

    #[test]
    fn deserializes_string_numbers_and_blank_dates() {
        let raw = r#"{
            "id": 1700000000000,
            "year": "2026",
            "status": "draft",
            "signed": true,
            "bandSize": "",
            "dateNeeded": "",
            "title": "Velocity",
            "scenes": [{"id": 5, "desc": "Opener"}]
        }"#;
        let d: Draft = serde_json::from_str(raw).unwrap();
        assert_eq!(d.year, Some(2026));
        assert_eq!(d.band_size, None);
        assert_eq!(d.date_needed, None);
        assert!(d.signed);
        assert_eq!(d.scenes[0].desc, "Opener");
        assert!(d.songs.is_empty());
    }

    #[test]
    fn unusable_numbers_and_dates_load_as_unset() {
        let raw = r#"{
            "id": 2,
            "year": "2026.0",
            "bandSize": "12.5",
            "dateNeeded": "next spring",
            "title": "Keep B"
        }"#;
        let d: Draft = serde_json::from_str(raw).unwrap();
        assert_eq!(d.year, Some(2026));
        assert_eq!(d.band_size, None);
        assert_eq!(d.date_needed, None);
        assert_eq!(d.title, "Keep B");

        for band_size in [r#""-3""#, "-3", "many", "true", "[1]", "1e40"] {
            let raw = format!(r#"{{"id": 1, "bandSize": {band_size}}}"#);
            let d: Draft = serde_json::from_str(&raw).unwrap();
            assert_eq!(d.band_size, None, "bandSize: {band_size}");
        }
    }

    #[test]
    fn add_scene_never_overflows_ids() {
        let raw = r#"{"id": 1, "scenes": [{"id": 9223372036854775807, "desc": "Finale"}]}"#;
        let mut d: Draft = serde_json::from_str(raw).unwrap();
        let a = d.add_scene_at(5);
        let b = d.add_scene_at(5);
        assert_eq!(a, 0);
        assert_eq!(b, 1);
        assert_eq!(d.scenes.len(), 3);
        assert_eq!(d.scenes[0].desc, "Finale");
    }
}
