use std::collections::HashSet;

use rdg_model::FieldRecord;

/// Audit fields that always lead a generated row, in this order.
pub const PRIORITY_HEADERS: [&str; 4] = ["CreatedBy", "CreatedDate", "ExternalId", "CenterCode"];

/// Move the first occurrence of each priority header to the front and keep
/// the rest in catalog order. Exact duplicate records are dropped.
pub fn ordered(records: &[FieldRecord]) -> Vec<FieldRecord> {
    let mut seen: HashSet<&FieldRecord> = HashSet::with_capacity(records.len());
    let mut result = Vec::with_capacity(records.len());

    for header in PRIORITY_HEADERS {
        if let Some(record) = records.iter().find(|record| record.header == header)
            && seen.insert(record)
        {
            result.push(record.clone());
        }
    }
    for record in records {
        if seen.insert(record) {
            result.push(record.clone());
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn priority_headers_lead() {
        let records = vec![
            FieldRecord::new("Ward"),
            FieldRecord::new("CenterCode"),
            FieldRecord::new("Age"),
            FieldRecord::new("CreatedBy"),
        ];
        let headers: Vec<String> = ordered(&records).into_iter().map(|r| r.header).collect();
        assert_eq!(headers, vec!["CreatedBy", "CenterCode", "Ward", "Age"]);
    }

    #[test]
    fn exact_duplicates_are_dropped() {
        let ward = FieldRecord::new("Ward").with_position(3);
        let other_ward = FieldRecord::new("Ward").with_position(4);
        let result = ordered(&[ward.clone(), ward.clone(), other_ward.clone()]);
        assert_eq!(result, vec![ward, other_ward]);
    }
}
