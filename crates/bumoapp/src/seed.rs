//! First-run content.
//!
//! When no document exists yet, the store writes this one so that a fresh
//! install renders a populated site instead of five empty pages.

use chrono::{DateTime, Utc};
use serde_json::{json, Value};

use crate::model::{Document, Fields, Record};

fn seed_record(id: &str, fields: Value, created_at: DateTime<Utc>) -> Record {
    let fields = match fields {
        Value::Object(map) => map,
        _ => Fields::new(),
    };
    Record::new(id.to_string(), fields, created_at)
}

pub fn seed_document(now: DateTime<Utc>) -> Document {
    Document {
        reports: vec![seed_record(
            "1",
            json!({
                "periode": "Q1 2024",
                "tanggal": "2024-03-31",
                "pendapatan": 15000000,
                "pengeluaran": 8500000,
                "saldo": 6500000,
                "keterangan": "Laporan keuangan triwulan pertama tahun 2024"
            }),
            now,
        )],
        articles: vec![seed_record(
            "1",
            json!({
                "title": "Strategi Kewirausahaan untuk Siswa SMK",
                "author": "Tim BUMO",
                "date": "2024-03-15",
                "content": "Kewirausahaan adalah keterampilan penting bagi siswa SMK. Artikel ini membahas strategi praktis untuk memulai bisnis sederhana, mengelola keuangan, dan mengembangkan mindset entrepreneurial.",
                "excerpt": "Panduan praktis memulai bisnis untuk siswa SMK"
            }),
            now,
        )],
        documentation: vec![seed_record(
            "1",
            json!({
                "title": "Workshop Kewirausahaan 2024",
                "description": "Workshop kewirausahaan dengan narasumber dari industri",
                "date": "2024-03-10",
                "image": "/uploads/sample-doc.jpg"
            }),
            now,
        )],
        alumni: vec![seed_record(
            "1",
            json!({
                "nama": "Ahmad Rizki",
                "periode": "2023/2024",
                "jabatan": "Ketua BUMO",
                "angkatan": "2024",
                "jurusan": "Teknik Komputer dan Jaringan",
                "photo": ""
            }),
            now,
        )],
        structure: vec![
            seed_record(
                "1",
                json!({
                    "nama": "Siti Nurhaliza",
                    "jabatan": "Ketua BUMO",
                    "periode": "2024/2025",
                    "divisi": "Kepemimpinan",
                    "photo": ""
                }),
                now,
            ),
            seed_record(
                "2",
                json!({
                    "nama": "Budi Santoso",
                    "jabatan": "Wakil Ketua",
                    "periode": "2024/2025",
                    "divisi": "Kepemimpinan",
                    "photo": ""
                }),
                now,
            ),
            seed_record(
                "3",
                json!({
                    "nama": "Dewi Lestari",
                    "jabatan": "Sekretaris",
                    "periode": "2024/2025",
                    "divisi": "Administrasi",
                    "photo": ""
                }),
                now,
            ),
            seed_record(
                "4",
                json!({
                    "nama": "Andi Prasetyo",
                    "jabatan": "Bendahara",
                    "periode": "2024/2025",
                    "divisi": "Keuangan",
                    "photo": ""
                }),
                now,
            ),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Collection;

    #[test]
    fn seed_populates_every_collection() {
        let doc = seed_document(Utc::now());
        for collection in Collection::ALL {
            assert!(!doc.records(collection).is_empty(), "{collection} is empty");
        }
        assert_eq!(doc.structure.len(), 4);
        assert_eq!(doc.reports[0].get("saldo"), Some(&json!(6500000)));
    }
}
