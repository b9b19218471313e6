use crate::store::DataStore;
use crate::types::{Complaint, DateRange, SentimentPost};
use std::collections::BTreeSet;

/// Current selection from the presentation layer.
///
/// An empty department or district set means "all", not "none": an empty
/// multi-select must never hide data.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSelection {
    pub departments: BTreeSet<String>,
    pub districts: BTreeSet<String>,
    pub date_range: Option<DateRange>,
}

impl FilterSelection {
    pub fn new<D, S>(departments: D, districts: S, date_range: Option<DateRange>) -> Self
    where
        D: IntoIterator,
        D::Item: Into<String>,
        S: IntoIterator,
        S::Item: Into<String>,
    {
        Self {
            departments: departments.into_iter().map(Into::into).collect(),
            districts: districts.into_iter().map(Into::into).collect(),
            date_range,
        }
    }

    fn matches(&self, department: &str, district: &str, date: chrono::NaiveDate) -> bool {
        (self.departments.is_empty() || self.departments.contains(department))
            && (self.districts.is_empty() || self.districts.contains(district))
            && self.date_range.map_or(true, |r| r.contains(date))
    }
}

/// Independently owned subsets produced by [`filter`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilteredData {
    pub complaints: Vec<Complaint>,
    pub sentiment: Vec<SentimentPost>,
}

/// Subset complaints and sentiment posts by the selection.
///
/// Returns `None` when the store has not been loaded. Base tables are left
/// untouched.
pub fn filter(store: &DataStore, selection: &FilterSelection) -> Option<FilteredData> {
    let data = store.datasets()?;

    let complaints: Vec<Complaint> = data
        .complaints
        .iter()
        .filter(|c| selection.matches(&c.department, &c.district, c.complaint_date))
        .cloned()
        .collect();
    let sentiment: Vec<SentimentPost> = data
        .sentiment
        .iter()
        .filter(|p| selection.matches(&p.department, &p.district, p.post_date))
        .cloned()
        .collect();

    log::debug!(
        "filter kept {}/{} complaints and {}/{} sentiment posts",
        complaints.len(),
        data.complaints.len(),
        sentiment.len(),
        data.sentiment.len()
    );
    Some(FilteredData {
        complaints,
        sentiment,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DataSources;
    use crate::store::tests::complaint;
    use crate::types::{Datasets, GroupColumn, SentimentLabel};
    use chrono::NaiveDate;

    fn post(id: &str, dept: &str, district: &str, date: (i32, u32, u32)) -> SentimentPost {
        SentimentPost {
            id: id.to_string(),
            department: dept.to_string(),
            district: district.to_string(),
            post_date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
            label: SentimentLabel::Neutral,
            score: 0.0,
            text: String::new(),
            platform: "Twitter".to_string(),
        }
    }

    fn store() -> DataStore {
        DataStore::from_datasets(
            DataSources::default(),
            Datasets {
                complaints: vec![
                    complaint("C1", "Health", "Kandy", (2024, 1, 1)),
                    complaint("C2", "Health", "Colombo", (2024, 2, 1)),
                    complaint("C3", "Transport", "Kandy", (2024, 3, 1)),
                    complaint("C4", "Education", "Galle", (2024, 3, 31)),
                ],
                sentiment: vec![
                    post("P1", "Health", "Kandy", (2024, 1, 10)),
                    post("P2", "Transport", "Galle", (2024, 3, 31)),
                ],
                ..Datasets::default()
            },
        )
    }

    fn ids(data: &FilteredData) -> Vec<&str> {
        data.complaints.iter().map(|c| c.id.as_str()).collect()
    }

    #[test]
    fn unloaded_store_yields_none() {
        let store = DataStore::new(DataSources::default());
        assert!(filter(&store, &FilterSelection::default()).is_none());
    }

    #[test]
    fn empty_selection_passes_everything_through() {
        let store = store();
        let out = filter(&store, &FilterSelection::default()).unwrap();
        let data = store.datasets().unwrap();
        assert_eq!(out.complaints, data.complaints);
        assert_eq!(out.sentiment, data.sentiment);
    }

    #[test]
    fn full_selection_round_trips() {
        let store = store();
        let selection = FilterSelection::new(
            store.unique_values(GroupColumn::Department),
            store.unique_values(GroupColumn::District),
            None,
        );
        let out = filter(&store, &selection).unwrap();
        assert_eq!(out.complaints, store.datasets().unwrap().complaints);
    }

    #[test]
    fn filters_by_department_and_district() {
        let store = store();
        let out = filter(&store, &FilterSelection::new(["Health"], ["Kandy"], None)).unwrap();
        assert_eq!(ids(&out), vec!["C1"]);
        assert_eq!(out.sentiment.len(), 1);

        let out = filter(&store, &FilterSelection::new(["Health"], Vec::<String>::new(), None))
            .unwrap();
        assert_eq!(ids(&out), vec!["C1", "C2"]);
    }

    #[test]
    fn date_range_is_inclusive_on_both_ends() {
        let store = store();
        let range = DateRange::new(
            NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 3, 31).unwrap(),
        );
        let selection = FilterSelection::new(Vec::<String>::new(), Vec::<String>::new(), Some(range));
        let out = filter(&store, &selection).unwrap();
        assert_eq!(ids(&out), vec!["C2", "C3", "C4"]);
        assert_eq!(out.sentiment.len(), 1);
        assert_eq!(out.sentiment[0].id, "P2");
    }

    #[test]
    fn base_tables_are_not_mutated() {
        let store = store();
        let before = store.datasets().unwrap().complaints.clone();
        let _ = filter(&store, &FilterSelection::new(["Nobody"], ["Nowhere"], None));
        assert_eq!(store.datasets().unwrap().complaints, before);
    }
}
