//! Lowers sealed pages to printpdf and writes the final bytes.

use std::io::{BufWriter, Cursor, Write};
use std::sync::Arc;

use printpdf::path::{PaintMode, WindingOrder};
use printpdf::{
    BuiltinFont, Color as PdfColor, ColorBits, ColorSpace, Image, ImageTransform, ImageXObject, IndirectFontRef, Line,
    Mm, PdfDocument, PdfDocumentReference, PdfLayerReference, Point as PdfPoint, Polygon, Pt, Px, Rgb,
};

use crate::canvas::{Color, DrawCommand, Page, Paint};
use crate::document::ItineraryDocument;
use crate::error::RenderError;
use crate::geometry::{Path, PathSegment, Point, Rect};
use crate::metrics::FontFace;
use crate::resources::{FontProgram, LogoImage, RenderResources};

type Ring = Vec<(PdfPoint, bool)>;

struct PdfFonts {
    regular: IndirectFontRef,
    bold: IndirectFontRef,
}

impl PdfFonts {
    fn register(doc: &PdfDocumentReference, program: &FontProgram) -> Result<Self, RenderError> {
        match program {
            FontProgram::Builtin => Ok(Self {
                regular: doc.add_builtin_font(BuiltinFont::Helvetica).map_err(pdf_error)?,
                bold: doc.add_builtin_font(BuiltinFont::HelveticaBold).map_err(pdf_error)?,
            }),
            FontProgram::Embedded { regular, bold } => {
                let regular_ref = doc.add_external_font(Cursor::new(&regular[..])).map_err(pdf_error)?;
                let bold_ref = if Arc::ptr_eq(regular, bold) {
                    regular_ref.clone()
                } else {
                    doc.add_external_font(Cursor::new(&bold[..])).map_err(pdf_error)?
                };
                Ok(Self {
                    regular: regular_ref,
                    bold: bold_ref,
                })
            }
        }
    }

    fn get(&self, face: FontFace) -> &IndirectFontRef {
        match face {
            FontFace::Regular => &self.regular,
            FontFace::Bold => &self.bold,
        }
    }
}

fn pdf_error(err: impl std::fmt::Display) -> RenderError {
    RenderError::Pdf(err.to_string())
}

fn mm(points: f32) -> Mm {
    Mm::from(Pt(points))
}

fn pdf_point(p: Point) -> PdfPoint {
    PdfPoint::new(mm(p.x), mm(p.y))
}

fn pdf_color(c: Color) -> PdfColor {
    PdfColor::Rgb(Rgb::new(c.r, c.g, c.b, None))
}

/// Serializes pages into one PDF. Nothing is returned unless the whole document was written.
pub fn serialize(
    pages: &[Page],
    document: &ItineraryDocument,
    resources: &RenderResources,
) -> Result<Vec<u8>, RenderError> {
    let first = pages.first().ok_or_else(|| RenderError::Pdf("document has no pages".into()))?;
    let size = first.size();
    let (doc, first_page, first_layer) = PdfDocument::new(document.title(), mm(size.width), mm(size.height), "Content");

    let site_name = resources.brand.site_name.clone();
    let author = document.operator_name.clone().unwrap_or_else(|| site_name.clone());
    let doc = doc.with_author(author).with_creator(site_name);
    let fonts = PdfFonts::register(&doc, resources.fonts.program())?;

    for (i, page) in pages.iter().enumerate() {
        let layer = if i == 0 {
            doc.get_page(first_page).get_layer(first_layer)
        } else {
            let size = page.size();
            let (p, l) = doc.add_page(mm(size.width), mm(size.height), "Content");
            doc.get_page(p).get_layer(l)
        };
        for command in page.commands() {
            lower(&layer, command, &fonts, resources.logo.as_ref());
        }
    }

    let mut buf: Vec<u8> = Vec::new();
    {
        let mut writer = BufWriter::new(&mut buf);
        doc.save(&mut writer).map_err(pdf_error)?;
        writer.flush()?;
    }
    Ok(buf)
}

fn lower(layer: &PdfLayerReference, command: &DrawCommand, fonts: &PdfFonts, logo: Option<&LogoImage>) {
    match command {
        DrawCommand::Rect { rect, paint } => paint_rings(layer, vec![rect_ring(*rect)], *paint),
        DrawCommand::Path { path, paint } => paint_rings(layer, path_rings(path), *paint),
        DrawCommand::Line { from, to, color, width } => {
            layer.set_outline_color(pdf_color(*color));
            layer.set_outline_thickness(*width);
            layer.add_line(Line {
                points: vec![(pdf_point(*from), false), (pdf_point(*to), false)],
                is_closed: false,
            });
        }
        DrawCommand::Text { x, y, text, style } => {
            layer.set_fill_color(pdf_color(style.color));
            layer.use_text(text.as_str(), style.size, mm(*x), mm(*y), fonts.get(style.face));
        }
        DrawCommand::Logo { rect } => {
            if let Some(logo) = logo {
                place_logo(layer, logo, *rect);
            }
        }
    }
}

fn paint_rings(layer: &PdfLayerReference, rings: Vec<Ring>, paint: Paint) {
    if rings.is_empty() {
        return;
    }
    let mode = match paint {
        Paint::Fill(color) => {
            layer.set_fill_color(pdf_color(color));
            PaintMode::Fill
        }
        Paint::Stroke { color, width } => {
            layer.set_outline_color(pdf_color(color));
            layer.set_outline_thickness(width);
            PaintMode::Stroke
        }
        Paint::FillStroke { fill, stroke, width } => {
            layer.set_fill_color(pdf_color(fill));
            layer.set_outline_color(pdf_color(stroke));
            layer.set_outline_thickness(width);
            PaintMode::FillStroke
        }
    };
    layer.add_polygon(Polygon {
        rings,
        mode,
        winding_order: WindingOrder::NonZero,
    });
}

fn rect_ring(rect: Rect) -> Ring {
    [
        Point::new(rect.x, rect.y),
        Point::new(rect.right(), rect.y),
        Point::new(rect.right(), rect.top()),
        Point::new(rect.x, rect.top()),
    ]
    .into_iter()
    .map(|p| (pdf_point(p), false))
    .collect()
}

// printpdf marks a cubic by flagging the point before the curve and the first control point.
fn path_rings(path: &Path) -> Vec<Ring> {
    let mut rings = Vec::new();
    let mut ring: Ring = Vec::new();
    for segment in path.segments() {
        match *segment {
            PathSegment::MoveTo(p) => {
                if !ring.is_empty() {
                    rings.push(std::mem::take(&mut ring));
                }
                ring.push((pdf_point(p), false));
            }
            PathSegment::LineTo(p) => ring.push((pdf_point(p), false)),
            PathSegment::CurveTo { c1, c2, to } => {
                if let Some(last) = ring.last_mut() {
                    last.1 = true;
                }
                ring.push((pdf_point(c1), true));
                ring.push((pdf_point(c2), false));
                ring.push((pdf_point(to), false));
            }
            PathSegment::Close => {
                if !ring.is_empty() {
                    rings.push(std::mem::take(&mut ring));
                }
            }
        }
    }
    if !ring.is_empty() {
        rings.push(ring);
    }
    rings
}

fn place_logo(layer: &PdfLayerReference, logo: &LogoImage, rect: Rect) {
    if rect.width <= 0.0 || rect.height <= 0.0 {
        return;
    }
    // Pick the DPI that makes the image exactly `rect.width` points wide.
    let dpi = logo.width_px as f32 * 72.0 / rect.width;
    let natural_height = logo.height_px as f32 * 72.0 / dpi;
    let image = Image::from(ImageXObject {
        width: Px(logo.width_px as usize),
        height: Px(logo.height_px as usize),
        color_space: ColorSpace::Rgb,
        bits_per_component: ColorBits::Bit8,
        interpolate: true,
        image_data: logo.rgb.clone(),
        image_filter: None,
        clipping_bbox: None,
        smask: None,
    });
    image.add_to_layer(
        layer.clone(),
        ImageTransform {
            translate_x: Some(mm(rect.x)),
            translate_y: Some(mm(rect.y)),
            dpi: Some(dpi),
            scale_y: Some(rect.height / natural_height),
            ..Default::default()
        },
    );
}
