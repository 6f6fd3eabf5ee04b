use crate::model::Catalog;

#[derive(Debug, Clone, PartialEq)]
pub struct RatingStats {
    pub average: f64,
    pub median: f64,
    pub best: (String, f64),
    pub worst: (String, f64),
}

/// Rating statistics over the whole catalog, `None` when it is empty.
/// On ties the first movie in catalog order wins.
pub fn rating_stats(movies: &Catalog) -> Option<RatingStats> {
    let mut entries = movies.iter().map(|(title, details)| (title, details.rating));
    let (first_title, first_rating) = entries.next()?;

    let mut best = (first_title, first_rating);
    let mut worst = (first_title, first_rating);
    for (title, rating) in entries {
        if rating > best.1 {
            best = (title, rating);
        }
        if rating < worst.1 {
            worst = (title, rating);
        }
    }

    let mut ratings: Vec<f64> = movies.values().map(|details| details.rating).collect();
    ratings.sort_by(f64::total_cmp);

    Some(RatingStats {
        average: ratings.iter().sum::<f64>() / ratings.len() as f64,
        median: median_of_sorted(&ratings),
        best: (best.0.clone(), best.1),
        worst: (worst.0.clone(), worst.1),
    })
}

fn median_of_sorted(ratings: &[f64]) -> f64 {
    let mid = ratings.len() / 2;
    if ratings.len() % 2 == 0 {
        (ratings[mid - 1] + ratings[mid]) / 2.0
    } else {
        ratings[mid]
    }
}

/// Titles sorted by rating, best first. Equal ratings keep catalog order.
pub fn sorted_by_rating(movies: &Catalog) -> Vec<(&String, f64)> {
    let mut sorted: Vec<_> = movies
        .iter()
        .map(|(title, details)| (title, details.rating))
        .collect();
    sorted.sort_by(|a, b| b.1.total_cmp(&a.1));
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::MovieDetails;

    fn catalog(entries: &[(&str, f64)]) -> Catalog {
        entries
            .iter()
            .map(|(title, rating)| {
                (
                    title.to_string(),
                    MovieDetails {
                        rating: *rating,
                        ..Default::default()
                    },
                )
            })
            .collect()
    }

    #[test]
    fn empty_catalog_has_no_stats() {
        assert_eq!(rating_stats(&Catalog::new()), None);
    }

    #[test]
    fn odd_count_stats() {
        let movies = catalog(&[("Alien", 8.5), ("Cats", 2.8), ("Up", 8.3)]);
        let stats = rating_stats(&movies).unwrap();

        assert!((stats.average - 6.533333).abs() < 1e-5);
        assert_eq!(stats.median, 8.3);
        assert_eq!(stats.best, ("Alien".to_string(), 8.5));
        assert_eq!(stats.worst, ("Cats".to_string(), 2.8));
    }

    #[test]
    fn even_count_median_is_mean_of_middle_pair() {
        let movies = catalog(&[("A", 6.0), ("B", 8.0), ("C", 7.0), ("D", 9.0)]);
        let stats = rating_stats(&movies).unwrap();

        assert_eq!(stats.median, 7.5);
        assert_eq!(stats.average, 7.5);
    }

    #[test]
    fn ties_pick_first_title() {
        let stats = rating_stats(&catalog(&[("B", 5.0), ("A", 5.0)])).unwrap();

        assert_eq!(stats.best.0, "A");
        assert_eq!(stats.worst.0, "A");
    }

    #[test]
    fn sorted_descending_by_rating() {
        let movies = catalog(&[("Cats", 2.8), ("Alien", 8.5), ("Up", 8.3)]);
        let titles: Vec<&str> = sorted_by_rating(&movies)
            .into_iter()
            .map(|(title, _)| title.as_str())
            .collect();

        assert_eq!(titles, vec!["Alien", "Up", "Cats"]);
    }
}
