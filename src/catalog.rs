/// Static university catalogue served alongside the lead form.
///
/// Holds the fee schedules shown in the fee lookup, the demo university
/// profiles, and the rules for working out which university a landing page
/// belongs to.
use serde::Serialize;
use std::fmt;

/// Footnote displayed under every fee table.
pub const FEE_NOTE: &str =
    "Fees are subject to change. Contact admissions for the latest information.";

const MIT_FEES: &[FeeRow] = &[
    FeeRow::new("B.Tech Computer Science", "₹2,50,000 - ₹3,00,000 per year"),
    FeeRow::new("B.Tech Mechanical", "₹2,25,000 - ₹2,75,000 per year"),
    FeeRow::new("B.Tech Electrical", "₹2,25,000 - ₹2,75,000 per year"),
    FeeRow::new("B.Tech Civil", "₹2,00,000 - ₹2,50,000 per year"),
    FeeRow::new("MBA", "₹4,50,000 - ₹5,50,000 per year"),
    FeeRow::new("M.Tech", "₹1,75,000 - ₹2,25,000 per year"),
];

const STANFORD_FEES: &[FeeRow] = &[
    FeeRow::new("Computer Science", "$55,000 - $65,000 per year"),
    FeeRow::new("Business Administration", "$75,000 - $85,000 per year"),
    FeeRow::new("Engineering", "$50,000 - $60,000 per year"),
    FeeRow::new("Data Science", "$60,000 - $70,000 per year"),
    FeeRow::new("AI & Machine Learning", "$65,000 - $75,000 per year"),
    FeeRow::new("Entrepreneurship", "$70,000 - $80,000 per year"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum University {
    Mit,
    Stanford,
    Unknown,
}

impl University {
    pub fn name(self) -> &'static str {
        match self {
            University::Mit => "MIT University",
            University::Stanford => "Stanford University",
            University::Unknown => "Unknown University",
        }
    }

    /// Resolves the university a landing page belongs to from its title.
    pub fn from_page_title(title: &str) -> Self {
        if title.contains("MIT") {
            University::Mit
        } else if title.contains("Stanford") {
            University::Stanford
        } else {
            University::Unknown
        }
    }

    /// Resolves the fee table for a page path such as `/mit-university.html`.
    ///
    /// Pages that match neither university fall back to MIT.
    pub fn from_page_path(path: &str) -> Self {
        let page = path
            .rsplit('/')
            .next()
            .filter(|segment| !segment.is_empty())
            .unwrap_or("index.html");

        if page.contains("mit") {
            University::Mit
        } else if page.contains("stanford") {
            University::Stanford
        } else {
            University::Mit
        }
    }

    /// Parses the URL slug used by the API routes.
    pub fn from_slug(slug: &str) -> Option<Self> {
        match slug.to_ascii_lowercase().as_str() {
            "mit" => Some(University::Mit),
            "stanford" => Some(University::Stanford),
            _ => None,
        }
    }
}

impl fmt::Display for University {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One line of a fee table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FeeRow {
    pub course: &'static str,
    pub annual_fee: &'static str,
}

impl FeeRow {
    const fn new(course: &'static str, annual_fee: &'static str) -> Self {
        Self { course, annual_fee }
    }
}

/// Fee table for a university, in display order. Unknown falls back to MIT.
pub fn fee_schedule(university: University) -> &'static [FeeRow] {
    match university {
        University::Stanford => STANFORD_FEES,
        University::Mit | University::Unknown => MIT_FEES,
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Location {
    pub city: &'static str,
    pub state: &'static str,
    pub country: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct Fee {
    pub amount: u32,
    pub currency: &'static str,
    pub per: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct CourseOffering {
    pub name: &'static str,
    pub duration_years: u8,
    pub fee: Fee,
}

#[derive(Debug, Clone, Serialize)]
pub struct UniversityProfile {
    pub id: u32,
    pub university: University,
    pub name: &'static str,
    pub location: Location,
    pub established: u16,
    pub ranking: &'static str,
    pub courses: Vec<CourseOffering>,
}

/// Demo profiles for every known university.
pub fn profiles() -> Vec<UniversityProfile> {
    vec![
        UniversityProfile {
            id: 1,
            university: University::Mit,
            name: University::Mit.name(),
            location: Location {
                city: "Mumbai",
                state: "Maharashtra",
                country: "India",
            },
            established: 1985,
            ranking: "Top 10 in India",
            courses: vec![
                CourseOffering {
                    name: "B.Tech Computer Science",
                    duration_years: 4,
                    fee: Fee {
                        amount: 250_000,
                        currency: "INR",
                        per: "year",
                    },
                },
                CourseOffering {
                    name: "MBA",
                    duration_years: 2,
                    fee: Fee {
                        amount: 450_000,
                        currency: "INR",
                        per: "year",
                    },
                },
            ],
        },
        UniversityProfile {
            id: 2,
            university: University::Stanford,
            name: University::Stanford.name(),
            location: Location {
                city: "Stanford",
                state: "California",
                country: "USA",
            },
            established: 1885,
            ranking: "#2 Globally",
            courses: vec![
                CourseOffering {
                    name: "Computer Science",
                    duration_years: 4,
                    fee: Fee {
                        amount: 55_000,
                        currency: "USD",
                        per: "year",
                    },
                },
                CourseOffering {
                    name: "Business Administration",
                    duration_years: 2,
                    fee: Fee {
                        amount: 75_000,
                        currency: "USD",
                        per: "year",
                    },
                },
            ],
        },
    ]
}
