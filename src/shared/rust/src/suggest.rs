/* src/shared/rust/src/suggest.rs */

pub(crate) fn levenshtein(a: &str, b: &str) -> usize {
  let n = b.chars().count();
  let mut prev: Vec<usize> = (0..=n).collect();
  let mut curr = vec![0; n + 1];
  for (i, ca) in a.chars().enumerate() {
    curr[0] = i + 1;
    for (j, cb) in b.chars().enumerate() {
      let cost = usize::from(!ca.eq_ignore_ascii_case(&cb));
      curr[j + 1] = (prev[j] + cost).min(prev[j + 1] + 1).min(curr[j] + 1);
    }
    std::mem::swap(&mut prev, &mut curr);
  }
  prev[n]
}

/// Closest candidate within edit distance 3, case-insensitive.
pub fn did_you_mean<'a>(name: &str, candidates: &[&'a str]) -> Option<&'a str> {
  candidates
    .iter()
    .filter(|c| **c != name)
    .map(|c| (*c, levenshtein(name, c)))
    .filter(|(_, d)| *d <= 3)
    .min_by_key(|(_, d)| *d)
    .map(|(c, _)| c)
}
