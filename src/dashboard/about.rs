//! About panel content

/// One paragraph, optionally led by a bold term
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AboutEntry {
    pub term: Option<&'static str>,
    pub text: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AboutSection {
    pub title: &'static str,
    pub entries: &'static [AboutEntry],
}

pub const ABOUT_TITLE: &str = "About";

pub const ABOUT_SECTIONS: &[AboutSection] = &[
    AboutSection {
        title: "Data",
        entries: &[
            AboutEntry {
                term: None,
                text: "Data is from The New York Times, based on reports from state and local health agencies.",
            },
            AboutEntry {
                term: None,
                text: "\"Day of Outbreak\" is used to measure time instead of \"Date\". This is to easily compare spread among each state.",
            },
        ],
    },
    AboutSection {
        title: "Parameters",
        entries: &[
            AboutEntry {
                term: Some("Cases/1000"),
                text: "number of cases per 1000 people in a state population",
            },
            AboutEntry {
                term: Some("Total cases (log chart)"),
                text: "total number of cases. Log chart is used to better illustrate change in number of cases.",
            },
            AboutEntry {
                term: Some("New Cases"),
                text: "daily new cases by day of outbreak.",
            },
        ],
    },
    AboutSection {
        title: "Notes",
        entries: &[AboutEntry {
            term: None,
            text: "2/27 is earliest possible 'Day 1,' since prior cases were isolated and may skew insights of \"community spread\"",
        }],
    },
];
