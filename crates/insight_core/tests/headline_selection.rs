use insight_core::{select_headline, Headline, MAX_HEADLINES};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn headlines(count: usize) -> Vec<Headline> {
    (0..count)
        .map(|i| Headline::new(format!("Title {i}"), format!("https://news.example/{i}")))
        .collect()
}

#[test]
fn empty_feed_yields_none() {
    let mut rng = StdRng::seed_from_u64(7);
    assert_eq!(select_headline(Vec::new(), MAX_HEADLINES, &mut rng), None);
}

#[test]
fn single_item_is_always_chosen() {
    let mut rng = StdRng::seed_from_u64(7);
    let only = Headline::new("Sample", "http://x/y");
    assert_eq!(
        select_headline(vec![only.clone()], MAX_HEADLINES, &mut rng),
        Some(only)
    );
}

#[test]
fn selection_is_drawn_from_leading_items_only() {
    let all = headlines(40);
    let mut rng = StdRng::seed_from_u64(42);
    for _ in 0..200 {
        let picked = select_headline(all.clone(), MAX_HEADLINES, &mut rng).unwrap();
        let position = all.iter().position(|h| *h == picked).expect("from feed");
        assert!(position < MAX_HEADLINES, "picked item {position}");
    }
}

#[test]
fn selection_varies_across_calls() {
    let all = headlines(MAX_HEADLINES);
    let mut rng = StdRng::seed_from_u64(1);
    let mut seen = std::collections::HashSet::new();
    for _ in 0..100 {
        seen.insert(select_headline(all.clone(), MAX_HEADLINES, &mut rng).unwrap());
    }
    assert!(seen.len() > 1);
}
