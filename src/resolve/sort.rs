use std::cmp::Ordering;

use crate::domain::{Casino, Country, Guide};
use crate::normalize::Record;

/// Best rating first, then name. Missing ratings sort as 0.
pub fn sort_casinos(casinos: &mut [Casino]) {
    casinos.sort_by(compare_casinos);
}

pub fn sort_countries(countries: &mut [Country]) {
    sort_by_display_name(countries);
}

pub fn sort_guides(guides: &mut [Guide]) {
    sort_by_display_name(guides);
}

pub fn sort_by_display_name<T: Record>(records: &mut [T]) {
    records.sort_by(|a, b| a.display_name().cmp(b.display_name()));
}

pub fn compare_casinos(a: &Casino, b: &Casino) -> Ordering {
    let rating = |c: &Casino| c.rating.unwrap_or(0.0);
    // equal ratings, signed zeros included, fall through to the name
    rating(b)
        .partial_cmp(&rating(a))
        .unwrap_or(Ordering::Equal)
        .then_with(|| a.display_name().cmp(b.display_name()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::normalize;
    use serde_json::json;

    fn casino(slug: &str, name: &str, rating: Option<f64>) -> Casino {
        let mut value = json!({ "slug": slug, "name": name });
        if let Some(r) = rating {
            value["rating"] = json!(r);
        }
        normalize(&value).unwrap()
    }

    #[test]
    fn test_casinos_sorted_by_rating_then_name() {
        let mut casinos = vec![
            casino("c", "Charlie", Some(4.0)),
            casino("u", "Unrated", None),
            casino("b", "Bravo", Some(4.8)),
            casino("a", "Alpha", Some(4.0)),
            casino("z", "Zulu", Some(0.0)),
        ];
        sort_casinos(&mut casinos);

        let order: Vec<&str> = casinos.iter().map(|c| c.slug.as_str()).collect();
        assert_eq!(order, vec!["b", "a", "c", "u", "z"]);

        for pair in casinos.windows(2) {
            let (ra, rb) = (pair[0].rating.unwrap_or(0.0), pair[1].rating.unwrap_or(0.0));
            assert!(ra >= rb);
            if ra == rb {
                assert!(pair[0].name <= pair[1].name);
            }
        }
    }

    #[test]
    fn test_negative_zero_rating_ties_with_unrated() {
        let mut casinos: Vec<Casino> = [
            json!({ "slug": "z", "name": "Zulu" }),
            json!({ "slug": "a", "name": "Alpha", "rating": -0.0 }),
        ]
        .iter()
        .filter_map(normalize)
        .collect();
        sort_casinos(&mut casinos);

        let names: Vec<&str> = casinos.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Alpha", "Zulu"]);
        assert_eq!(casinos[0].rating.map(f64::is_sign_negative), Some(false));
    }

    #[test]
    fn test_sort_is_stable_for_equal_keys() {
        let mut casinos = vec![
            casino("first", "Same", Some(3.0)),
            casino("second", "Same", Some(3.0)),
        ];
        sort_casinos(&mut casinos);
        assert_eq!(casinos[0].slug, "first");
    }

    #[test]
    fn test_countries_and_guides_sorted_by_name() {
        let mut countries: Vec<Country> = [
            json!({ "code": "NZ", "name": "New Zealand" }),
            json!({ "code": "AU", "name": "Australia" }),
        ]
        .iter()
        .filter_map(normalize)
        .collect();
        sort_countries(&mut countries);
        assert_eq!(countries[0].code, "AU");

        let mut guides: Vec<Guide> = [
            json!({ "slug": "z", "title": "Withdrawals" }),
            json!({ "slug": "y", "title": "Bonuses" }),
        ]
        .iter()
        .filter_map(normalize)
        .collect();
        sort_guides(&mut guides);
        assert_eq!(guides[0].title, "Bonuses");
    }
}
