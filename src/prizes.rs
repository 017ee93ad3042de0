/// A prize tier shown on the landing screen. Titles are translation keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Prize {
    pub place: &'static str,
    pub title: &'static str,
    pub description: Option<&'static str>,
}

pub const PRIZES: &[Prize] = &[
    Prize {
        place: "1",
        title: "prizes.first",
        description: Some("prizes.first_description"),
    },
    Prize {
        place: "2",
        title: "prizes.second",
        description: Some("prizes.second_description"),
    },
    Prize {
        place: "3",
        title: "prizes.third",
        description: Some("prizes.third_description"),
    },
    Prize {
        place: "4-10",
        title: "prizes.rest",
        description: Some("prizes.rest_description"),
    },
];
