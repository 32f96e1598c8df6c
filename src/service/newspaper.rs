//! Newspaper generation orchestrator
//!
//! Two sequential text calls (grounded search, then formatting into
//! strict JSON), a fence-stripped parse, fixed slot assignment, then a
//! parallel per-article illustration fan-out with placeholder fallback.

use std::time::Instant;

use futures::future::join_all;
use serde::Deserialize;

use crate::config::GenerationConfig;
use crate::data::{Article, ArticleImage, NewspaperData};
use crate::error::AppError;
use crate::genai::{ContentGenerator, TextOptions};
use crate::metrics::{GENERATION_DURATION_SECONDS, GENERATIONS_TOTAL, IMAGE_FALLBACKS_TOTAL};

use super::layout::assign_slots;

const SEARCH_TEMPERATURE: f32 = 0.3;
const SEARCH_MAX_OUTPUT_TOKENS: u32 = 4096;
const FORMAT_TEMPERATURE: f32 = 0.7;
const FORMAT_MAX_OUTPUT_TOKENS: u32 = 8192;

/// Body text characters carried into the illustration prompt
const IMAGE_PROMPT_BODY_CHARS: usize = 100;
/// Headline characters carried into the placeholder URL
const PLACEHOLDER_HEADLINE_CHARS: usize = 20;

const PLACEHOLDER_BASE_URL: &str = "https://placehold.co/400x300/f59e0b/white";

/// One article as returned by the formatting call
///
/// Every field is optional so that a sloppy upstream response degrades
/// to slot defaults instead of failing the parse.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleStub {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub headline: Option<String>,
    #[serde(default)]
    pub body_text: Option<String>,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub image_alt: Option<String>,
}

/// The formatting call's JSON payload
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawNewspaper {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub subtitle: String,
    #[serde(default)]
    pub articles: Vec<ArticleStub>,
}

/// Newspaper generation service
///
/// Stateless per request; the generator carries the caller's credential.
pub struct NewspaperService<'a> {
    generator: &'a dyn ContentGenerator,
    config: &'a GenerationConfig,
}

impl<'a> NewspaperService<'a> {
    pub fn new(generator: &'a dyn ContentGenerator, config: &'a GenerationConfig) -> Self {
        Self { generator, config }
    }

    /// Generate a complete ten-article newspaper
    ///
    /// # Arguments
    /// * `grade_level` - Target audience grade ("1".."5")
    ///
    /// # Errors
    /// Fails when either text call fails or the formatting response is
    /// not valid JSON. Individual illustration failures are recovered
    /// with placeholder images and never fail the newspaper.
    pub async fn generate(&self, grade_level: &str) -> Result<NewspaperData, AppError> {
        let started = Instant::now();

        let result = self.generate_inner(grade_level).await;

        let status = if result.is_ok() { "success" } else { "error" };
        GENERATIONS_TOTAL.with_label_values(&[status]).inc();
        GENERATION_DURATION_SECONDS.observe(started.elapsed().as_secs_f64());

        result
    }

    async fn generate_inner(&self, grade_level: &str) -> Result<NewspaperData, AppError> {
        let reading_level = reading_level_for(grade_level);

        let now = chrono::Utc::now();
        let week_ago = now - chrono::Duration::days(7);
        let today = format_date(now);
        let week_ago_str = format_date(week_ago);
        let date_range = format!("{} – {}", week_ago_str, today);

        // Step 1a: search for real news using grounding (no JSON constraint)
        tracing::info!(grade_level, "Searching for real news with grounding");
        let news_text = self
            .generator
            .generate_text(
                &self.config.text_model,
                &search_prompt(&today, &week_ago_str),
                TextOptions {
                    temperature: SEARCH_TEMPERATURE,
                    max_output_tokens: SEARCH_MAX_OUTPUT_TOKENS,
                    grounded_search: true,
                },
            )
            .await?;
        tracing::info!(chars = news_text.len(), "Search step complete");

        // Step 1b: format the real news into kid-friendly JSON (no grounding needed)
        let raw_text = self
            .generator
            .generate_text(
                &self.config.text_model,
                &format_prompt(&news_text, reading_level),
                TextOptions {
                    temperature: FORMAT_TEMPERATURE,
                    max_output_tokens: FORMAT_MAX_OUTPUT_TOKENS,
                    grounded_search: false,
                },
            )
            .await?;

        let raw = parse_newspaper_json(&raw_text)?;
        tracing::info!(articles = raw.articles.len(), "Formatting step complete");

        let mut newspaper = NewspaperData {
            title: raw.title,
            subtitle: raw.subtitle,
            date_range: Some(date_range),
            articles: assign_slots(raw.articles),
        };

        // Step 2: generate illustrations for all articles in parallel.
        // Each task resolves to an image or a placeholder, so one slow or
        // failed call cannot abort the batch.
        tracing::info!("Generating article illustrations in parallel");
        let images = join_all(
            newspaper
                .articles
                .iter()
                .map(|article| self.illustrate(article)),
        )
        .await;

        // Step 3: merge the illustrations back, one per article
        for (article, image) in newspaper.articles.iter_mut().zip(images) {
            article.images = vec![image];
        }

        Ok(newspaper)
    }

    /// Request one illustration, substituting the placeholder on failure
    async fn illustrate(&self, article: &Article) -> ArticleImage {
        let alt = article
            .images
            .first()
            .map(|image| image.alt.clone())
            .filter(|alt| !alt.is_empty())
            .unwrap_or_else(|| article.headline.clone());

        match self
            .generator
            .generate_image(&self.config.image_model, &image_prompt(article))
            .await
        {
            Ok(image) => ArticleImage {
                url: format!("data:{};base64,{}", image.mime_type, image.data),
                alt,
            },
            Err(error) => {
                tracing::warn!(
                    article = %article.id,
                    %error,
                    "Illustration failed; using placeholder"
                );
                IMAGE_FALLBACKS_TOTAL.inc();
                ArticleImage {
                    url: placeholder_url(&article.headline),
                    alt,
                }
            }
        }
    }
}

/// Map a grade tag to the prompt's reading level wording
fn reading_level_for(grade_level: &str) -> &'static str {
    match grade_level {
        "1" => "1st grade",
        "2" => "2nd grade",
        "3" => "3rd grade",
        "4" => "4th grade",
        "5" => "5th grade",
        _ => "2nd grade",
    }
}

/// "August 5, 2026" style date
fn format_date(date: chrono::DateTime<chrono::Utc>) -> String {
    date.format("%B %-d, %Y").to_string()
}

fn search_prompt(today: &str, week_ago: &str) -> String {
    format!(
        "Today is {today}. Search for and list the 10 biggest REAL news stories from \
         {week_ago} to {today}. Include a mix of: politics, science/technology, world \
         events, business, sports, and environment. For each story, write 2-3 sentences \
         summarizing what happened, including specific names, dates, and facts. These \
         must be real, verifiable current events."
    )
}

fn format_prompt(news_text: &str, reading_level: &str) -> String {
    format!(
        r#"You are a kids' newspaper editor. Here are today's real news stories:

{news_text}

Rewrite these stories for a {reading_level} reading level. Use short sentences and simple words. Keep real names of people and places. Be factually accurate but engaging. Help kids understand why the news matters.

Return ONLY valid JSON (no markdown, no code fences, no extra text). Your response must start with {{ and end with }}.

Return exactly 10 articles: 2 featured articles (the most exciting stories, with 80-100 word bodyText) and 8 regular articles (45-55 word bodyText). Put the 2 featured articles first in the array, then the 8 regular articles.

Each article must have:
- "id": short kebab-case slug
- "headline": 3-8 words, fun and punchy, ending with ! or ?
- "bodyText": the article text
- "featured": true for the 2 featured articles, false for the rest
- "imageAlt": short description of what illustration would fit this article

JSON format:
{{
  "title": "THE KIDS' WEEKLY NEWS",
  "subtitle": "Your weekly source for fun and fascinating stories!",
  "articles": [
    {{
      "id": "example-slug",
      "headline": "Short Fun Headline!",
      "bodyText": "Simple sentences here...",
      "featured": true,
      "imageAlt": "A rocket launching into space"
    }}
  ]
}}"#
    )
}

fn image_prompt(article: &Article) -> String {
    let body_excerpt: String = article
        .body_text
        .chars()
        .take(IMAGE_PROMPT_BODY_CHARS)
        .collect();
    format!(
        "Generate an image: A child-friendly, colorful cartoon illustration for a kids' \
         newspaper article about: {}. {}. Style: bright colors, simple shapes, friendly \
         characters, suitable for children ages 6-10, newspaper illustration style, no \
         text or words in the image.",
        article.headline, body_excerpt
    )
}

/// Placeholder image URL carrying the truncated headline
fn placeholder_url(headline: &str) -> String {
    let truncated: String = headline.chars().take(PLACEHOLDER_HEADLINE_CHARS).collect();
    format!(
        "{}?text={}",
        PLACEHOLDER_BASE_URL,
        urlencoding::encode(&truncated)
    )
}

/// Parse the formatting response, tolerating markdown code fences
///
/// Malformed JSON is a terminal error for the whole request.
fn parse_newspaper_json(raw: &str) -> Result<RawNewspaper, AppError> {
    let text = strip_code_fences(raw);
    serde_json::from_str(text).map_err(|e| {
        let head: String = text.chars().take(500).collect();
        tracing::error!(error = %e, head = %head, "Formatting response is not valid JSON");
        AppError::Generation(format!(
            "failed to parse formatting response as JSON: {}",
            e
        ))
    })
}

fn strip_code_fences(text: &str) -> &str {
    let text = text.trim();
    let text = text
        .strip_prefix("```json")
        .or_else(|| text.strip_prefix("```"))
        .unwrap_or(text);
    text.strip_suffix("```").unwrap_or(text).trim()
}
