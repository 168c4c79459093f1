use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

/// Label-keyed values in document order, serialized as a JSON object.
///
/// Re-inserting a label overwrites its value in place.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelMap<V>(Vec<(String, V)>);

impl<V> Default for LabelMap<V> {
    fn default() -> Self {
        Self(Vec::new())
    }
}

impl<V> LabelMap<V> {
    pub fn insert(&mut self, label: impl Into<String>, value: V) {
        let label = label.into();
        match self.0.iter_mut().find(|(k, _)| *k == label) {
            Some((_, slot)) => *slot = value,
            None => self.0.push((label, value)),
        }
    }

    pub fn get(&self, label: &str) -> Option<&V> {
        self.0.iter().find(|(k, _)| k == label).map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<V: Serialize> Serialize for LabelMap<V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (label, value) in &self.0 {
            map.serialize_entry(label, value)?;
        }
        map.end()
    }
}

pub type FeeTable = LabelMap<f64>;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackFees {
    pub science: FeeTable,
    pub non_science: FeeTable,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChargePair {
    pub science: f64,
    pub non_science: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UndergraduateFees {
    pub fresh_students: TrackFees,
    pub returning_students: TrackFees,
    pub additional_charges: LabelMap<ChargePair>,
    pub note: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProgramFee {
    pub program: String,
    pub freshers: f64,
    pub returning: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PostgraduateFees {
    pub programs: Vec<ProgramFee>,
}

pub const NO_DEMARCATION: &str = "N/A";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HostelFee {
    pub sn: String,
    pub hostel_name: String,
    pub demarcation: String,
    pub amount: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AcceptanceFees {
    pub medical_sciences: FeeTable,
    pub other_candidates: FeeTable,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Announcement {
    pub title: String,
    #[serde(rename = "content")]
    pub excerpt: String,
    pub full_content: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RequiredDocument {
    pub number: String,
    pub document: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Requirements {
    pub documents_required: Vec<RequiredDocument>,
    pub instructions: Vec<String>,
}

/// Everything extracted from one fetch of the page.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub timestamp: String,
    pub undergraduate_fees: UndergraduateFees,
    pub postgraduate_fees: PostgraduateFees,
    pub hostel_fees: Vec<HostelFee>,
    pub acceptance_fees: AcceptanceFees,
    pub announcements: Vec<Announcement>,
    pub requirements: Requirements,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_map_keeps_insertion_order_and_overwrites_in_place() {
        let mut m = FeeTable::default();
        m.insert("Tuition", 1.0);
        m.insert("Library", 2.0);
        m.insert("Tuition", 3.0);
        assert_eq!(m.len(), 2);
        assert_eq!(m.get("Tuition"), Some(&3.0));
        let json = serde_json::to_string(&m).unwrap();
        assert_eq!(json, r#"{"Tuition":3.0,"Library":2.0}"#);
    }

    #[test]
    fn wire_names_are_camel_case() {
        let fees = UndergraduateFees::default();
        let v = serde_json::to_value(&fees).unwrap();
        assert!(v["freshStudents"]["nonScience"].is_object());
        assert!(v["returningStudents"]["science"].is_object());
        assert!(v["additionalCharges"].is_object());
        assert_eq!(v["note"], "");

        let a = Announcement {
            title: "t".into(),
            excerpt: "e...".into(),
            full_content: "e".into(),
        };
        let v = serde_json::to_value(&a).unwrap();
        assert_eq!(v["content"], "e...");
        assert_eq!(v["fullContent"], "e");
    }
}
