//! Column registry for the village spreadsheet.
//!
//! The sheet has one fixed logical schema. Reads resolve columns by header
//! name, writes always use the fixed positional layout in [`WRITE_LAYOUT`].
//! If the real header row has drifted from that layout the two can disagree;
//! that risk is documented, not corrected.

use std::collections::HashMap;

/// The semantic fields of one spreadsheet row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Title,
    Description,
    Author,
    Date,
    Image,
    Role,
    PersonName,
    Contact,
    MaleCount,
    FemaleCount,
    FamilyCount,
    ToddlerCount,
    BusinessName,
    BusinessDescription,
    BusinessImage,
    BusinessManager,
}

impl Field {
    pub const ALL: [Field; 16] = [
        Field::Title,
        Field::Description,
        Field::Author,
        Field::Date,
        Field::Image,
        Field::Role,
        Field::PersonName,
        Field::Contact,
        Field::MaleCount,
        Field::FemaleCount,
        Field::FamilyCount,
        Field::ToddlerCount,
        Field::BusinessName,
        Field::BusinessDescription,
        Field::BusinessImage,
        Field::BusinessManager,
    ];

    /// Canonical normalized header name for this field.
    ///
    /// The sheet headers are Indonesian; "Anak Kecil/Balita" reaches the
    /// canonical key below through [`normalize_header`].
    pub fn header_name(&self) -> &'static str {
        match self {
            Field::Title => "judul",
            Field::Description => "deskripsi",
            Field::Author => "penulis",
            Field::Date => "tanggal",
            Field::Image => "gambar",
            Field::Role => "jabatan",
            Field::PersonName => "nama",
            Field::Contact => "kontak",
            Field::MaleCount => "laki laki",
            Field::FemaleCount => "perempuan",
            Field::FamilyCount => "keluarga",
            Field::ToddlerCount => "anak kecilbalita",
            Field::BusinessName => "nama umkm",
            Field::BusinessDescription => "deskripsi umkm",
            Field::BusinessImage => "gambar umkm",
            Field::BusinessManager => "pengelola",
        }
    }

    /// Fixed 0-based write position for this field (first slot in
    /// [`WRITE_LAYOUT`]).
    pub fn write_position(&self) -> usize {
        WRITE_LAYOUT
            .iter()
            .position(|f| f == self)
            .unwrap_or_default()
    }
}

/// The fixed 17-column positional row written on create and update.
///
/// Column I (index 8) repeats the image field: existing renderers read the
/// news image from either column E or column I, so both slots are filled
/// with the same value.
pub const WRITE_LAYOUT: [Field; 17] = [
    Field::Title,
    Field::Description,
    Field::Author,
    Field::Date,
    Field::Image,
    Field::Role,
    Field::PersonName,
    Field::Contact,
    Field::Image,
    Field::MaleCount,
    Field::FemaleCount,
    Field::FamilyCount,
    Field::ToddlerCount,
    Field::BusinessName,
    Field::BusinessDescription,
    Field::BusinessImage,
    Field::BusinessManager,
];

/// 0-based positions of the image columns (E, I and P) that the read path
/// pre-normalizes before handing the grid to clients.
pub const IMAGE_COLUMNS: [usize; 3] = [4, 8, 15];

/// Normalize a raw header cell: trim, lowercase, strip everything outside
/// `[a-z0-9]` and whitespace, then collapse whitespace runs to one space.
///
/// Idempotent: normalizing an already-normalized name is a no-op.
pub fn normalize_header(raw: &str) -> String {
    let stripped: String = raw
        .trim()
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || c.is_whitespace())
        .collect();

    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Name-based column index built from a grid's header row.
#[derive(Debug, Default)]
pub struct HeaderIndex {
    positions: HashMap<String, usize>,
}

impl HeaderIndex {
    /// Build the index from the raw header row. When the same normalized
    /// name appears at more than one position, the first occurrence wins.
    pub fn from_header_row<S: AsRef<str>>(header: &[S]) -> Self {
        let mut positions = HashMap::new();
        for (idx, cell) in header.iter().enumerate() {
            let name = normalize_header(cell.as_ref());
            if name.is_empty() {
                continue;
            }
            positions.entry(name).or_insert(idx);
        }
        HeaderIndex { positions }
    }

    /// 0-based column position for a normalized header name.
    pub fn lookup(&self, name: &str) -> Option<usize> {
        self.positions.get(name).copied()
    }

    /// 0-based column position for a semantic field.
    pub fn position(&self, field: Field) -> Option<usize> {
        self.lookup(field.header_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_strips_punctuation_and_collapses_spaces() {
        assert_eq!(normalize_header("  Anak Kecil/Balita "), "anak kecilbalita");
        assert_eq!(normalize_header("Laki -  Laki"), "laki laki");
        assert_eq!(normalize_header("Nama UMKM"), "nama umkm");
    }

    #[test]
    fn normalize_is_idempotent() {
        for field in Field::ALL {
            let name = field.header_name();
            assert_eq!(normalize_header(name), name);
        }
    }

    #[test]
    fn header_index_matches_despite_casing_and_noise() {
        let index = HeaderIndex::from_header_row(&["Judul", "TANGGAL", "Anak Kecil/Balita"]);
        assert_eq!(index.position(Field::Title), Some(0));
        assert_eq!(index.position(Field::Date), Some(1));
        assert_eq!(index.position(Field::ToddlerCount), Some(2));
        assert_eq!(index.position(Field::Contact), None);
    }

    #[test]
    fn duplicate_header_uses_first_position() {
        let index = HeaderIndex::from_header_row(&["Gambar", "Judul", "Gambar"]);
        assert_eq!(index.position(Field::Image), Some(0));
    }

    #[test]
    fn write_layout_duplicates_image_at_position_8() {
        assert_eq!(WRITE_LAYOUT.len(), 17);
        assert_eq!(WRITE_LAYOUT[4], Field::Image);
        assert_eq!(WRITE_LAYOUT[8], Field::Image);
        assert_eq!(Field::Image.write_position(), 4);
        assert_eq!(Field::BusinessManager.write_position(), 16);
    }
}
