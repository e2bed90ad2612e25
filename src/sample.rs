//! Fixed sample content for previews.
//!
//! The preview surface renders every palette update against the same
//! input record, so color changes are the only visible difference between
//! two consecutive preview frames.

use crate::generate::InputRecord;

/// Sample CV content keyed by overlay field name.
pub fn sample_record() -> InputRecord {
    let pairs: &[(&str, &str)] = &[
        ("firstName", "LUKAS"),
        ("lastName", "BECKER"),
        ("jobTitle", "MARKETING MANAGER"),
        ("tagline", "Kreativität trifft Strategie"),
        ("phone", "+49 151 9876543"),
        ("email", "lukas@becker.de"),
        ("address", "Hauptstraße 8, 80331 München"),
        ("website", "www.lukasbecker.de"),
        ("profileTitle", "PROFIL"),
        (
            "profileBody",
            "Marketingexperte mit Leidenschaft für\nMarkenführung und digitale Kampagnen.",
        ),
        ("experienceTitle", "BERUFSERFAHRUNG"),
        (
            "experienceBody",
            "2019 – heute  Marketing Manager, Nordlicht GmbH\n2015 – 2019  Referent, Agentur Südwind",
        ),
        ("educationTitle", "AUSBILDUNG"),
        (
            "educationBody",
            "2011 – 2015  Medienwirtschaft (B.A.)\nHochschule München",
        ),
        ("skillsTitle", "KOMPETENZEN"),
        (
            "skillsBody",
            "Markenstrategie\nPerformance Marketing\nContent Produktion",
        ),
        ("languagesTitle", "SPRACHEN"),
        (
            "languagesBody",
            "Deutsch (Muttersprache)\nEnglisch (fließend)",
        ),
    ];
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}
