//! Grid ↔ record mapping properties exercised through the store, the way
//! the handlers drive them.

use desa_portal::columns::{normalize_header, Field};
use desa_portal::mapper::{decode, encode_row, Grid};
use desa_portal::record::Record;
use desa_portal::sheets::{MemorySheet, SheetStore};
use serde_json::{json, Value};

fn header_row() -> Vec<Value> {
    [
        "Judul", "Deskripsi", "Penulis", "Tanggal", "Gambar", "Jabatan", "Nama", "Kontak",
        "Gambar", "Laki Laki", "Perempuan", "Keluarga", "Anak Kecil/Balita", "Nama UMKM",
        "Deskripsi UMKM", "Gambar UMKM", "Pengelola",
    ]
    .iter()
    .map(|h| json!(h))
    .collect()
}

fn titled(title: &str) -> Vec<Value> {
    let mut row = vec![json!(""); 17];
    row[0] = json!(title);
    row
}

#[test]
fn decode_yields_one_record_per_data_row_in_row_order() {
    let grid: Grid = vec![
        header_row(),
        titled("a"),
        vec![],
        titled("c"),
        titled("d"),
    ];

    let records = decode(&grid);
    assert_eq!(records.len(), grid.len() - 1);
    for (i, record) in records.iter().enumerate() {
        assert_eq!(record.row, Some((i + 2) as u32));
    }

    // The blank row decodes (mapping never drops rows) but is filtered
    // from display by the meaningful check.
    assert!(!records[1].is_meaningful());
    assert_eq!(records.iter().filter(|r| r.is_meaningful()).count(), 3);
}

#[test]
fn normalization_is_idempotent_over_real_headers() {
    for raw in ["Judul", "Laki  Laki", "Anak Kecil/Balita", "NAMA UMKM"] {
        let once = normalize_header(raw);
        assert_eq!(normalize_header(&once), once);
    }
}

#[tokio::test]
async fn row_references_go_stale_after_a_delete() {
    let sheet = MemorySheet::new(vec![
        header_row(),
        titled("first"),
        titled("second"),
        titled("third"),
    ]);

    let records = decode(&sheet.fetch_all().await.unwrap());
    let second = records[1].clone();
    let third = records[2].clone();
    assert_eq!(second.row, Some(3));
    assert_eq!(third.row, Some(4));

    sheet.delete_at(second.row.unwrap()).await.unwrap();

    // The reference held for "third" now points at a different row; an
    // update through it lands on the wrong record. This is the documented
    // positional-drift hazard — references must be re-read after writes.
    let refreshed = decode(&sheet.fetch_all().await.unwrap());
    assert_eq!(refreshed.len(), 2);
    assert_eq!(refreshed[1].title, "third");
    assert_eq!(refreshed[1].row, Some(3));
    assert_ne!(refreshed[1].row, third.row);
}

#[tokio::test]
async fn update_through_stale_reference_mutates_the_wrong_row() {
    let sheet = MemorySheet::new(vec![
        header_row(),
        titled("first"),
        titled("second"),
        titled("third"),
    ]);

    // Client A reads, client B deletes row 2, then A updates "second"
    // using its stale reference 3.
    let stale = decode(&sheet.fetch_all().await.unwrap())[1].clone();
    sheet.delete_at(2).await.unwrap();

    let mut edited = stale.clone();
    edited.title = "second (edited)".into();
    sheet
        .update_at(stale.row.unwrap(), encode_row(&edited))
        .await
        .unwrap();

    let grid = sheet.fetch_all().await.unwrap();
    // "third" was overwritten; "second" survived untouched at row 2.
    assert_eq!(grid[1][0], json!("second"));
    assert_eq!(grid[2][0], json!("second (edited)"));
}

#[tokio::test]
async fn appended_rows_decode_with_fresh_references() {
    let sheet = MemorySheet::new(vec![header_row()]);

    let record = Record {
        title: "Berita".into(),
        author: "Budi".into(),
        date: "1/1/2024".into(),
        contact: "0812".into(),
        ..Default::default()
    };
    sheet.append(encode_row(&record)).await.unwrap();

    let records = decode(&sheet.fetch_all().await.unwrap());
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].row, Some(2));
    assert_eq!(records[0].title, "Berita");
    assert_eq!(records[0].contact, "0812");

    // Row-reference is attached on decode, never round-tripped through
    // the positional row itself.
    assert_eq!(encode_row(&records[0]).len(), 17);
}

#[test]
fn decode_reads_duplicate_image_column_from_the_first_match() {
    let mut row = titled("t");
    row[4] = json!("https://img/e.png");
    row[8] = json!("https://img/i.png");
    let grid: Grid = vec![header_row(), row];

    let record = decode(&grid).remove(0);
    assert_eq!(record.image, "https://img/e.png");
    assert_eq!(record.get(Field::Image), "https://img/e.png");
}
