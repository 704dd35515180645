//! Image rendering for a post.
//!
//! Each [`ContentFormat`] maps to one [`VisualTemplate`]. Templates that want
//! the author's headshot as a reference carry a stock-photo variant that is used
//! when the profile has none. Every template forbids rendered text.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use postpilot_core::{ContentFormat, Profile};
use postpilot_gateway::InlineData;

use crate::error::StudioError;
use crate::studio::{or_fallback, Studio};

/// Prefix of the stock-photo URL returned when rendering fails.
pub const PLACEHOLDER_PREFIX: &str = "https://picsum.photos/800/800?random=";

/// Prompt recipe for one visual format.
#[derive(Debug, Clone, Copy)]
pub struct VisualTemplate {
    pub format: ContentFormat,
    /// Prompt for `topic`. Sent with the headshot when one is expected.
    pub prompt: fn(&str) -> String,
    /// Set when the template expects the author's headshot; used instead of
    /// `prompt` if the profile has none.
    pub without_reference: Option<fn(&str) -> String>,
}

impl VisualTemplate {
    #[must_use]
    pub fn uses_reference(&self) -> bool {
        self.without_reference.is_some()
    }
}

fn cinematic_photo(topic: &str) -> String {
    format!(
        "Cinematic editorial photograph about \"{topic}\". Dramatic natural light, \
         shallow depth of field, 35mm film look, rich color grading. NO TEXT."
    )
}

fn data_visualization(topic: &str) -> String {
    format!(
        "Abstract 3D artwork representing the concept of \"{topic}\". Flowing geometric \
         forms, glass and light, deep blue and teal palette, high-end tech aesthetic. \
         Purely visual: NO TEXT, NO NUMBERS, NO CHARTS."
    )
}

fn personal_photo(topic: &str) -> String {
    format!(
        "Professional photograph of the person in the reference image, keeping their \
         face and features, in a modern office setting that evokes \"{topic}\". Natural \
         light, confident posture, editorial LinkedIn style. NO TEXT."
    )
}

fn personal_photo_stock(topic: &str) -> String {
    format!(
        "Candid professional photograph of a business leader in a modern office, \
         thinking about \"{topic}\". Natural light, editorial LinkedIn style. NO TEXT."
    )
}

fn carousel_design(topic: &str) -> String {
    format!(
        "Minimalist background for a LinkedIn carousel about \"{topic}\". Soft gradient, \
         subtle geometric texture, generous empty space, muted corporate palette. NO TEXT."
    )
}

fn realistic_office(topic: &str) -> String {
    format!(
        "Photorealistic modern workplace scene related to \"{topic}\". A team \
         collaborating around a table, daylight through large windows, authentic \
         and unstaged. NO TEXT."
    )
}

pub const TEMPLATES: [VisualTemplate; 5] = [
    VisualTemplate {
        format: ContentFormat::CinematicPhoto,
        prompt: cinematic_photo,
        without_reference: None,
    },
    VisualTemplate {
        format: ContentFormat::DataVisualization,
        prompt: data_visualization,
        without_reference: None,
    },
    VisualTemplate {
        format: ContentFormat::PersonalPhoto,
        prompt: personal_photo,
        without_reference: Some(personal_photo_stock),
    },
    VisualTemplate {
        format: ContentFormat::CarouselDesign,
        prompt: carousel_design,
        without_reference: None,
    },
    VisualTemplate {
        format: ContentFormat::RealisticOffice,
        prompt: realistic_office,
        without_reference: None,
    },
];

/// The template for `format`.
#[must_use]
pub fn template_for(format: ContentFormat) -> &'static VisualTemplate {
    match format {
        ContentFormat::CinematicPhoto => &TEMPLATES[0],
        ContentFormat::DataVisualization => &TEMPLATES[1],
        ContentFormat::PersonalPhoto => &TEMPLATES[2],
        ContentFormat::CarouselDesign => &TEMPLATES[3],
        ContentFormat::RealisticOffice => &TEMPLATES[4],
    }
}

/// `data:<mime>;base64,<payload>`
#[must_use]
pub fn to_data_url(image: &InlineData) -> String {
    format!(
        "data:{};base64,{}",
        image.mime_type,
        BASE64.encode(&image.data)
    )
}

fn placeholder_url() -> String {
    format!("{PLACEHOLDER_PREFIX}{}", rand::random::<u32>())
}

/// Decode a stored headshot: a `data:` URL or bare base64 (assumed JPEG).
fn decode_headshot(raw: &str) -> Option<InlineData> {
    let raw = raw.trim();
    let (mime_type, payload) = match raw.strip_prefix("data:") {
        Some(rest) => {
            let (meta, payload) = rest.split_once(',')?;
            let mime = meta.strip_suffix(";base64")?;
            (mime, payload)
        }
        None => ("image/jpeg", raw),
    };
    match BASE64.decode(payload.as_bytes()) {
        Ok(data) if !data.is_empty() => Some(InlineData::new(mime_type, data)),
        Ok(_) => None,
        Err(e) => {
            tracing::warn!(error = %e, "headshot is not valid base64; rendering without it");
            None
        }
    }
}

impl Studio {
    /// Render the image for a post and return it as a URL.
    ///
    /// On success the URL is a `data:` URL. When the model produces no image
    /// or the call fails, a random stock-photo URL starting with
    /// [`PLACEHOLDER_PREFIX`] is returned instead.
    ///
    /// # Errors
    ///
    /// [`StudioError::EmptyInput`] for a blank topic and
    /// [`StudioError::Cancelled`].
    pub async fn render_asset(
        &self,
        topic: &str,
        format: ContentFormat,
        profile: &Profile,
    ) -> Result<String, StudioError> {
        let topic = topic.trim();
        if topic.is_empty() {
            return Err(StudioError::EmptyInput("topic"));
        }
        let template = template_for(format);

        let reference = if template.uses_reference() {
            profile.headshot.as_deref().and_then(decode_headshot)
        } else {
            None
        };
        let prompt = match (&reference, template.without_reference) {
            (None, Some(stock)) => stock(topic),
            _ => (template.prompt)(topic),
        };

        let result = self
            .call(
                "asset",
                self.gateway().generate_image(&prompt, reference.as_ref()),
            )
            .await
            .and_then(|image| {
                image
                    .map(|img| to_data_url(&img))
                    .ok_or_else(|| StudioError::malformed("asset", "no image data in answer"))
            });
        or_fallback("asset", result, placeholder_url)
    }
}
