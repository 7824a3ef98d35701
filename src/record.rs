//! A decoded, named view of one spreadsheet row.
//!
//! The wire names (serde renames) keep the JSON contract the admin and
//! public pages already speak: Indonesian camelCase keys plus the optional
//! `_row` row-reference.

use serde::{Deserialize, Serialize};

use crate::columns::Field;

/// One data row, decoded into named fields.
///
/// `row` is the 1-based position of the originating row in the grid (the
/// header is row 1, the first data row is row 2). It is positional, not a
/// stable key: a delete shifts every subsequent record's row-reference up
/// by one, so callers must reload the grid after any write.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Record {
    #[serde(rename = "_row", skip_serializing_if = "Option::is_none")]
    pub row: Option<u32>,

    #[serde(rename = "judul")]
    pub title: String,
    #[serde(rename = "deskripsi")]
    pub description: String,
    #[serde(rename = "penulis")]
    pub author: String,
    #[serde(rename = "tanggal")]
    pub date: String,
    #[serde(rename = "gambar")]
    pub image: String,

    #[serde(rename = "jabatan")]
    pub role: String,
    #[serde(rename = "nama")]
    pub person_name: String,
    #[serde(rename = "kontak")]
    pub contact: String,

    #[serde(rename = "lakiLaki")]
    pub male_count: String,
    #[serde(rename = "perempuan")]
    pub female_count: String,
    #[serde(rename = "keluarga")]
    pub family_count: String,
    #[serde(rename = "anakBalita")]
    pub toddler_count: String,

    #[serde(rename = "namaUmkm")]
    pub business_name: String,
    #[serde(rename = "deskripsiUmkm")]
    pub business_description: String,
    #[serde(rename = "gambarUmkm")]
    pub business_image: String,
    #[serde(rename = "pengelola")]
    pub business_manager: String,
}

impl Record {
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Title => &self.title,
            Field::Description => &self.description,
            Field::Author => &self.author,
            Field::Date => &self.date,
            Field::Image => &self.image,
            Field::Role => &self.role,
            Field::PersonName => &self.person_name,
            Field::Contact => &self.contact,
            Field::MaleCount => &self.male_count,
            Field::FemaleCount => &self.female_count,
            Field::FamilyCount => &self.family_count,
            Field::ToddlerCount => &self.toddler_count,
            Field::BusinessName => &self.business_name,
            Field::BusinessDescription => &self.business_description,
            Field::BusinessImage => &self.business_image,
            Field::BusinessManager => &self.business_manager,
        }
    }

    pub fn set(&mut self, field: Field, value: String) {
        let slot = match field {
            Field::Title => &mut self.title,
            Field::Description => &mut self.description,
            Field::Author => &mut self.author,
            Field::Date => &mut self.date,
            Field::Image => &mut self.image,
            Field::Role => &mut self.role,
            Field::PersonName => &mut self.person_name,
            Field::Contact => &mut self.contact,
            Field::MaleCount => &mut self.male_count,
            Field::FemaleCount => &mut self.female_count,
            Field::FamilyCount => &mut self.family_count,
            Field::ToddlerCount => &mut self.toddler_count,
            Field::BusinessName => &mut self.business_name,
            Field::BusinessDescription => &mut self.business_description,
            Field::BusinessImage => &mut self.business_image,
            Field::BusinessManager => &mut self.business_manager,
        };
        *slot = value;
    }

    /// Whether the record carries any content worth rendering.
    ///
    /// Image and business-manager alone do not make a row meaningful; this
    /// mirrors the filter the public site applies. Display-only — decode and
    /// encode never drop rows, blank rows still occupy a row-reference.
    pub fn is_meaningful(&self) -> bool {
        [
            &self.title,
            &self.description,
            &self.author,
            &self.date,
            &self.role,
            &self.person_name,
            &self.contact,
            &self.male_count,
            &self.female_count,
            &self.family_count,
            &self.toddler_count,
            &self.business_name,
            &self.business_description,
            &self.business_image,
        ]
        .iter()
        .any(|v| !v.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn deserializes_wire_names_with_defaults() {
        let record: Record = serde_json::from_value(json!({
            "judul": "Hello",
            "lakiLaki": "120",
            "unknownKey": "ignored"
        }))
        .unwrap();

        assert_eq!(record.title, "Hello");
        assert_eq!(record.male_count, "120");
        assert_eq!(record.author, "");
        assert_eq!(record.row, None);
    }

    #[test]
    fn serializes_row_reference_as_underscore_row() {
        let record = Record {
            row: Some(2),
            title: "Hello".into(),
            ..Default::default()
        };
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["_row"], 2);
        assert_eq!(value["judul"], "Hello");
    }

    #[test]
    fn blank_row_is_not_meaningful() {
        let mut record = Record::default();
        assert!(!record.is_meaningful());

        // Image alone does not count as content.
        record.image = "https://example.com/a.png".into();
        assert!(!record.is_meaningful());

        record.role = "Kepala Desa".into();
        assert!(record.is_meaningful());
    }
}
