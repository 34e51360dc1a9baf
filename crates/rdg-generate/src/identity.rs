//! Synthetic identity numbers for `NRIC/FIN` columns.
//!
//! Generated values are foreigner identification numbers: an `F` prefix,
//! seven digits and a check letter computed with the standard weights.

use rand::Rng;
use rdg_model::ColumnTemplate;
use tracing::debug;

pub const IDENTITY_COLUMN: &str = "NRIC/FIN";

const WEIGHTS: [u32; 7] = [2, 7, 6, 5, 4, 3, 2];
const ST_CHECK: [char; 11] = ['J', 'Z', 'I', 'H', 'G', 'F', 'E', 'D', 'C', 'B', 'A'];
const FG_CHECK: [char; 11] = ['X', 'W', 'U', 'T', 'R', 'Q', 'P', 'N', 'M', 'L', 'K'];

fn check_letter(prefix: char, digits: &[u32; 7]) -> Option<char> {
    let mut sum: u32 = digits.iter().zip(WEIGHTS).map(|(d, w)| d * w).sum();
    let table = match prefix {
        'S' => &ST_CHECK,
        'T' => {
            sum += 4;
            &ST_CHECK
        }
        'F' => &FG_CHECK,
        'G' => {
            sum += 4;
            &FG_CHECK
        }
        _ => return None,
    };
    Some(table[(sum % 11) as usize])
}

/// Random `F`-series identification number.
pub fn generate_fin<R: Rng + ?Sized>(rng: &mut R) -> String {
    let digits: [u32; 7] = std::array::from_fn(|_| rng.random_range(0..10));
    let body: String = digits.iter().map(|d| d.to_string()).collect();
    // 'F' always has a check table.
    let check = check_letter('F', &digits).unwrap_or('X');
    format!("F{body}{check}")
}

/// Returns true if `value` is a well-formed S/T/F/G number with a valid check letter.
pub fn is_valid_identity(value: &str) -> bool {
    let chars: Vec<char> = value.trim().to_ascii_uppercase().chars().collect();
    if chars.len() != 9 {
        return false;
    }
    let mut digits = [0u32; 7];
    for (slot, ch) in digits.iter_mut().zip(&chars[1..8]) {
        match ch.to_digit(10) {
            Some(digit) => *slot = digit,
            None => return false,
        }
    }
    check_letter(chars[0], &digits) == Some(chars[8])
}

/// Replace the values of mandatory identity columns with fresh numbers.
///
/// `values` is a full sheet row (column 0 is the row name). Returns the
/// number of replaced cells.
pub fn refresh_identity_values<R: Rng + ?Sized>(
    template: &ColumnTemplate,
    values: &mut Vec<String>,
    rng: &mut R,
) -> usize {
    let mut replaced = 0;
    for column in template
        .columns
        .iter()
        .filter(|column| column.mandatory && column.clean_name.eq_ignore_ascii_case(IDENTITY_COLUMN))
    {
        if values.len() <= column.column_index {
            values.resize(column.column_index + 1, String::new());
        }
        values[column.column_index] = generate_fin(rng);
        replaced += 1;
    }
    if replaced > 0 {
        debug!(replaced, "refreshed identity columns");
    }
    replaced
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    #[test]
    fn known_check_letters() {
        assert!(is_valid_identity("S1234567D"));
        assert!(is_valid_identity("F1234567N"));
        assert!(!is_valid_identity("S1234567A"));
        assert!(!is_valid_identity("X1234567D"));
        assert!(!is_valid_identity("S12345D"));
    }

    #[test]
    fn generated_numbers_validate() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..50 {
            let fin = generate_fin(&mut rng);
            assert!(fin.starts_with('F'));
            assert!(is_valid_identity(&fin), "{fin}");
        }
    }

    #[test]
    fn refresh_only_touches_mandatory_identity_columns() {
        let template = ColumnTemplate::from_headers(["Name", "M##NRIC/FIN", "NRIC/FIN", "M##Age"]);
        let mut values: Vec<String> = vec!["S1".into(), "old".into(), "keep".into(), "30".into()];
        let replaced = refresh_identity_values(&template, &mut values, &mut StdRng::seed_from_u64(3));
        assert_eq!(replaced, 1);
        assert!(is_valid_identity(&values[1]));
        assert_eq!(values[2], "keep");
        assert_eq!(values[3], "30");
    }
}
