/// Plain-text information brochure offered as a download on each landing page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Brochure {
    pub file_name: String,
    pub content: String,
}

impl Brochure {
    pub fn for_university(university: &str) -> Self {
        let content = format!(
            "\n{university} - Information Brochure\n\n\
             Welcome to {university}!\n\n\
             This is a sample brochure download. In a real implementation,\n\
             this would download an actual PDF brochure with detailed\n\
             information about courses, facilities, and admission procedures.\n\n\
             For more information, please contact our admissions office.\n\n\
             Thank you for your interest in {university}!\n"
        );

        Self {
            file_name: file_name(university),
            content,
        }
    }
}

/// `MIT University` becomes `MIT-University-Brochure.txt`.
fn file_name(university: &str) -> String {
    let slug = university.split_whitespace().collect::<Vec<_>>().join("-");
    format!("{}-Brochure.txt", slug)
}
