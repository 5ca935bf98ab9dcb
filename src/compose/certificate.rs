//! Certificate composition from declarative templates.
//!
//! A template is a list of positioned text fields; composition interpolates
//! the caller's field values into each field's format string and draws it
//! with the declared font, colour, and transforms. Missing placeholder
//! values substitute empty text with a log line - an incomplete certificate
//! is still a certificate.

use crate::{
    compose::ComposedDocument,
    errors::Result,
    templates::{FieldSpec, TemplateRegistry},
};
use printpdf::{
    BuiltinFont, Color, IndirectFontRef, Mm, PdfDocument, PdfLayerReference, Rgb, TextMatrix,
};
use std::collections::{BTreeMap, HashMap};
use tracing::warn;

/// Composes a certificate from a registered template and field values.
///
/// # Errors
/// Returns [`crate::errors::Error::TemplateNotFound`] /
/// [`crate::errors::Error::UnsupportedTemplateVersion`] from template
/// resolution, and propagates PDF backend failures.
pub fn certificate(
    registry: &TemplateRegistry,
    template_id: &str,
    requested_version: Option<u32>,
    fields: &BTreeMap<String, String>,
) -> Result<ComposedDocument> {
    let template = registry.resolve(template_id, requested_version)?;

    let (doc, page1, layer1) = PdfDocument::new(
        format!("Certificate - {template_id}"),
        Mm(template.page_width as f32),
        Mm(template.page_height as f32),
        "Certificate",
    );
    let layer = doc.get_page(page1).get_layer(layer1);

    let mut fonts: HashMap<String, IndirectFontRef> = HashMap::new();
    for spec in &template.fields {
        let font = match fonts.get(&spec.font) {
            Some(font) => font.clone(),
            None => {
                let font = doc
                    .add_builtin_font(builtin_font(&spec.font))
                    .map_err(crate::compose::pdf_error)?;
                fonts.insert(spec.font.clone(), font.clone());
                font
            }
        };
        draw_field(&layer, &font, spec, fields);
    }

    let bytes = doc.save_to_bytes().map_err(crate::compose::pdf_error)?;
    Ok(ComposedDocument {
        bytes,
        media_type: template.media_type.clone(),
    })
}

fn draw_field(
    layer: &PdfLayerReference,
    font: &IndirectFontRef,
    spec: &FieldSpec,
    fields: &BTreeMap<String, String>,
) {
    let mut text = interpolate(&spec.format_template(), fields);
    if spec.uppercase {
        text = text.to_uppercase();
    }
    if text.trim().is_empty() {
        return;
    }

    layer.set_fill_color(fill_color(spec));
    layer.begin_text_section();
    layer.set_font(font, spec.size as f32);
    // Spacing is set on every field so one field's letter spacing never
    // leaks into the next.
    layer.set_character_spacing(spec.letter_spacing as f32);
    if spec.rotation == 0.0 {
        layer.set_text_cursor(Mm(spec.x as f32), Mm(spec.y as f32));
    } else {
        layer.set_text_matrix(TextMatrix::TranslateRotate(
            Mm(spec.x as f32).into_pt(),
            Mm(spec.y as f32).into_pt(),
            spec.rotation as f32,
        ));
    }
    layer.write_text(text, font);
    layer.end_text_section();
}

/// Substitutes `{key}` placeholders from the field-value map. Unknown keys
/// substitute empty and are logged; an unterminated brace is kept literal.
fn interpolate(template: &str, fields: &BTreeMap<String, String>) -> String {
    let mut out = String::with_capacity(template.len());
    let mut chars = template.chars();
    while let Some(c) = chars.next() {
        if c != '{' {
            out.push(c);
            continue;
        }
        let mut key = String::new();
        let mut closed = false;
        for k in chars.by_ref() {
            if k == '}' {
                closed = true;
                break;
            }
            key.push(k);
        }
        if closed {
            match fields.get(&key) {
                Some(value) => out.push_str(value),
                None => {
                    warn!(placeholder = %key, "no value supplied for certificate placeholder");
                }
            }
        } else {
            out.push('{');
            out.push_str(&key);
        }
    }
    out
}

/// Maps a template font name to a builtin PDF font.
fn builtin_font(name: &str) -> BuiltinFont {
    match name.trim().to_lowercase().as_str() {
        "helvetica-bold" => BuiltinFont::HelveticaBold,
        "helvetica-oblique" => BuiltinFont::HelveticaOblique,
        "times" | "times-roman" => BuiltinFont::TimesRoman,
        "times-bold" => BuiltinFont::TimesBold,
        "times-italic" => BuiltinFont::TimesItalic,
        "courier" => BuiltinFont::Courier,
        "courier-bold" => BuiltinFont::CourierBold,
        "helvetica" => BuiltinFont::Helvetica,
        other => {
            warn!(font = other, "unknown template font, falling back to Helvetica");
            BuiltinFont::Helvetica
        }
    }
}

/// The field's fill colour with opacity applied.
///
/// Builtin-font text has no alpha channel, so watermark opacity is
/// approximated by blending the declared colour toward white.
fn fill_color(spec: &FieldSpec) -> Color {
    let (r, g, b) = parse_hex_color(&spec.color).unwrap_or_else(|| {
        warn!(color = %spec.color, "invalid template colour, falling back to black");
        (0.0, 0.0, 0.0)
    });
    let opacity = spec.opacity.clamp(0.0, 1.0);
    let blend = |channel: f64| 1.0 - (1.0 - channel) * opacity;
    Color::Rgb(Rgb::new(
        blend(r) as f32,
        blend(g) as f32,
        blend(b) as f32,
        None,
    ))
}

/// Parses `#RRGGBB` into normalized channels.
fn parse_hex_color(value: &str) -> Option<(f64, f64, f64)> {
    let hex = value.trim().strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let channel = |range: std::ops::Range<usize>| {
        u8::from_str_radix(&hex[range], 16)
            .ok()
            .map(|v| f64::from(v) / 255.0)
    };
    Some((channel(0..2)?, channel(2..4)?, channel(4..6)?))
}
