use std::path::{Path, PathBuf};

use krsbot_core::QAEntry;
use serde_json::Value;
use tracing::{info, warn};

/// Load every `*.json` file in `dir` and concatenate their records.
///
/// Files are read in lexicographic file-name order; records keep their
/// in-file order. A file that is not valid JSON is skipped with a
/// warning, as is any record missing a required field — neither aborts
/// the rest of the load. If no usable record is found anywhere
/// (including a missing directory), the built-in default bank is
/// returned so the system never starts with zero knowledge.
pub async fn load_dir(dir: &Path) -> Vec<QAEntry> {
    let mut entries = Vec::new();

    let mut paths: Vec<PathBuf> = Vec::new();
    match tokio::fs::read_dir(dir).await {
        Ok(mut read_dir) => loop {
            match read_dir.next_entry().await {
                Ok(Some(dirent)) => {
                    let path = dirent.path();
                    if path.extension().is_some_and(|ext| ext == "json") {
                        paths.push(path);
                    }
                }
                Ok(None) => break,
                Err(e) => {
                    warn!(dir = %dir.display(), error = %e, "Failed to list knowledge directory");
                    break;
                }
            }
        },
        Err(e) => {
            info!(dir = %dir.display(), error = %e, "Knowledge directory not readable");
        }
    }
    paths.sort();

    for path in &paths {
        match tokio::fs::read_to_string(path).await {
            Ok(content) => match parse_records(&content) {
                Ok(records) => {
                    info!(file = %path.display(), records = records.len(), "Loaded knowledge file");
                    entries.extend(records);
                }
                Err(e) => {
                    warn!(file = %path.display(), error = %e, "Skipping malformed knowledge file");
                }
            },
            Err(e) => {
                warn!(file = %path.display(), error = %e, "Skipping unreadable knowledge file");
            }
        }
    }

    if entries.is_empty() {
        info!("No knowledge records found, using the built-in default bank");
        return default_entries();
    }
    entries
}

/// Parse one file's content: the root is either a single record object
/// or an array of record objects. In an array, a record missing a
/// required field is rejected with a warning while its siblings load.
fn parse_records(content: &str) -> Result<Vec<QAEntry>, serde_json::Error> {
    let root: Value = serde_json::from_str(content)?;
    let mut records = Vec::new();
    match root {
        Value::Array(items) => {
            for (position, item) in items.into_iter().enumerate() {
                match serde_json::from_value::<QAEntry>(item) {
                    Ok(record) => records.push(record),
                    Err(e) => {
                        warn!(record = position, error = %e, "Rejecting invalid record");
                    }
                }
            }
        }
        other => records.push(serde_json::from_value(other)?),
    }
    Ok(records)
}

/// The built-in default bank: the baseline KRS topics the system can
/// always answer, in a fixed order.
pub fn default_entries() -> Vec<QAEntry> {
    vec![
        QAEntry::new(
            "Apa itu KRS?",
            "KRS (Kartu Rencana Studi) adalah dokumen yang berisi daftar mata kuliah \
             yang akan diambil mahasiswa pada semester tertentu. KRS wajib diisi setiap \
             awal semester sebagai syarat mengikuti perkuliahan.",
        ),
        QAEntry::new(
            "Apa itu KRS dan bagaimana cara mengisinya?",
            "KRS (Kartu Rencana Studi) adalah dokumen yang berisi daftar mata kuliah \
             yang akan diambil mahasiswa pada semester tertentu. Cara mengisinya: \
             1) Login ke sistem akademik, 2) Pilih menu KRS, 3) Pilih mata kuliah yang \
             diinginkan, 4) Pastikan tidak ada bentrok jadwal, 5) Submit KRS sebelum deadline.",
        ),
        QAEntry::new(
            "Berapa maksimal SKS yang bisa diambil dalam satu semester?",
            "Maksimal SKS yang bisa diambil tergantung pada IPK semester sebelumnya: \
             IPK ≥ 3.00 dapat mengambil maksimal 24 SKS, IPK 2.50-2.99 dapat mengambil \
             maksimal 21 SKS, IPK 2.00-2.49 dapat mengambil maksimal 18 SKS, IPK < 2.00 \
             dapat mengambil maksimal 15 SKS.",
        ),
        QAEntry::new(
            "Kapan deadline pengisian KRS?",
            "Deadline pengisian KRS biasanya 2 minggu setelah masa registrasi dimulai. \
             Tanggal pasti dapat dilihat di kalender akademik atau pengumuman dari bagian \
             akademik.",
        ),
        QAEntry::new(
            "Bagaimana jika terlambat mengisi KRS?",
            "Mahasiswa yang terlambat mengisi KRS harus segera menghubungi bagian \
             akademik dan dosen pembimbing akademik. Keterlambatan dapat dikenakan sanksi \
             berupa pengurangan jumlah SKS yang boleh diambil atau tidak dapat mengikuti \
             perkuliahan pada semester berjalan.",
        ),
        QAEntry::new(
            "Apa fungsi dosen pembimbing akademik?",
            "Dosen pembimbing akademik bertugas membimbing mahasiswa dalam perencanaan \
             studi, menyetujui KRS yang diajukan, dan memberikan konsultasi akademik \
             selama masa studi.",
        ),
        QAEntry::new(
            "Bagaimana prosedur pengajuan cuti akademik?",
            "Prosedur pengajuan cuti akademik: 1) Konsultasi dengan dosen pembimbing \
             akademik, 2) Mengisi formulir cuti di bagian akademik, 3) Melampirkan surat \
             persetujuan orang tua atau wali, 4) Menunggu persetujuan dekan. Cuti akademik \
             maksimal 2 semester selama masa studi.",
        ),
        QAEntry::new(
            "Apakah mata kuliah bisa diganti setelah KRS dikunci?",
            "Setelah KRS dikunci, perubahan mata kuliah hanya dapat dilakukan pada masa \
             perubahan KRS, biasanya 1-2 minggu setelah perkuliahan dimulai, dengan \
             persetujuan dosen pembimbing akademik.",
        ),
    ]
}
