/* demos/star-wars/src/lib.rs */

//! Prerender hook of the Star Wars pages: the movie API is called once and
//! every page's context is precomputed from that single response.

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

pub const MOVIES_URL: &str = "https://star-wars.brillout.com/api/films.json";

/// A film as returned by the API, with `id` assigned from its position.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MovieDetails {
  #[serde(default)]
  pub id: String,
  pub title: String,
  pub release_date: String,
  pub director: String,
  pub producer: String,
}

/// What the list page needs per film.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Movie {
  pub id: String,
  pub title: String,
  pub release_date: String,
}

/// What a film's own page needs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MovieSummary {
  pub id: String,
  pub title: String,
  pub release_date: String,
  pub director: String,
  pub producer: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PageProps {
  Movies { movies: Vec<Movie> },
  Movie { movie: MovieSummary },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DocumentProps {
  pub title: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageContextInit {
  pub page_props: PageProps,
  pub document_props: DocumentProps,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PrerenderEntry {
  pub url: String,
  pub page_context: PageContextInit,
}

pub trait MovieSource {
  fn star_wars_movies(&self) -> impl Future<Output = Result<Vec<MovieDetails>>> + Send;
}

#[derive(Deserialize)]
struct FilmsResponse {
  results: Vec<MovieDetails>,
}

/// Fetches films over HTTP.
pub struct SwapiSource {
  client: reqwest::Client,
  url: String,
}

impl SwapiSource {
  pub fn new(url: impl Into<String>) -> Self {
    Self { client: reqwest::Client::new(), url: url.into() }
  }
}

impl Default for SwapiSource {
  fn default() -> Self {
    Self::new(MOVIES_URL)
  }
}

impl MovieSource for SwapiSource {
  async fn star_wars_movies(&self) -> Result<Vec<MovieDetails>> {
    let resp = self
      .client
      .get(&self.url)
      .header("User-Agent", "trellis-star-wars")
      .send()
      .await
      .with_context(|| format!("failed to fetch {}", self.url))?;
    if !resp.status().is_success() {
      bail!("{} returned {}", self.url, resp.status());
    }
    let data: FilmsResponse = resp.json().await.context("failed to parse films response")?;
    Ok(with_ids(data.results))
  }
}

/// Ids are 1-based positions in the API response.
pub fn with_ids(movies: Vec<MovieDetails>) -> Vec<MovieDetails> {
  movies.into_iter().enumerate().map(|(i, m)| MovieDetails { id: (i + 1).to_string(), ..m }).collect()
}

pub fn filter_movies_data(movies: &[MovieDetails]) -> Vec<Movie> {
  movies
    .iter()
    .map(|m| Movie { id: m.id.clone(), title: m.title.clone(), release_date: m.release_date.clone() })
    .collect()
}

pub fn filter_movie_data(movie: &MovieDetails) -> MovieSummary {
  MovieSummary {
    id: movie.id.clone(),
    title: movie.title.clone(),
    release_date: movie.release_date.clone(),
    director: movie.director.clone(),
    producer: movie.producer.clone(),
  }
}

pub fn get_title(movies: &[MovieDetails]) -> String {
  format!("{} Star Wars Movies", movies.len())
}

/// URLs and page contexts of the list page and every film page.
pub async fn on_before_prerender_start<S: MovieSource>(source: &S) -> Result<Vec<PrerenderEntry>> {
  let movies = source.star_wars_movies().await?;

  let mut entries = Vec::with_capacity(movies.len() + 1);
  entries.push(PrerenderEntry {
    url: "/star-wars".to_string(),
    page_context: PageContextInit {
      page_props: PageProps::Movies { movies: filter_movies_data(&movies) },
      document_props: DocumentProps { title: get_title(&movies) },
    },
  });
  entries.extend(movies.iter().map(|movie| PrerenderEntry {
    url: format!("/star-wars/{}", movie.id),
    page_context: PageContextInit {
      page_props: PageProps::Movie { movie: filter_movie_data(movie) },
      document_props: DocumentProps { title: movie.title.clone() },
    },
  }));
  Ok(entries)
}
