pub const ENGLISH: &str = "English";
pub const INDONESIAN: &str = "Indonesian";
pub const BILINGUAL: &str = "Bilingual (Indonesian/English)";

const INDONESIAN_MARKERS: &[&str] = &[
    "abstrak",
    "kata kunci",
    "pendahuluan",
    "daftar pustaka",
    "universitas",
    "fakultas",
    "jurusan",
    "prodi",
    "penelitian",
    "kesimpulan",
];

const ENGLISH_MARKERS: &[&str] = &[
    "abstract",
    "keywords",
    "introduction",
    "university",
    "faculty",
    "department",
    "research",
    "conclusion",
    "references",
];

/// Guess the document language from section and affiliation vocabulary.
///
/// Counts how many distinct markers of each language occur. Two or more of
/// both means a bilingual document (common for Indonesian papers with an
/// English abstract).
pub fn detect_language(text: &str) -> &'static str {
    let lower = text.to_lowercase();
    let count = |markers: &[&str]| markers.iter().filter(|m| lower.contains(*m)).count();

    let indonesian = count(INDONESIAN_MARKERS);
    let english = count(ENGLISH_MARKERS);

    if indonesian >= 2 && english >= 2 {
        BILINGUAL
    } else if indonesian >= 2 && indonesian > english {
        INDONESIAN
    } else {
        ENGLISH
    }
}
