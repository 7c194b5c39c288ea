// ABOUTME: PPTX generation module for the deck-blocks library
// ABOUTME: Writes recorded slides (shapes, text, images, tables, charts) into a PowerPoint package

use crate::errors::{DeckError, Result};
use crate::media::{self, FALLBACK_PX, MediaData};
use crate::sink::{
    Align, ChartKind, ChartSeries, ChartStyle, Frame, ShapeKind, ShapeStyle, TableStyle, TextStyle,
    VAlign,
};
use crate::slide::{Element, Slide};
use crate::utils::{self, inches_to_emu, points_to_emu};
use log::{info, warn};
use quick_xml::escape::escape;
use std::fs;
use std::io::{Seek, Write};
use std::path::Path;
use zip::{ZipWriter, write::FileOptions};

const NS_DECL: &str = r#"xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main""#;
const XML_HEADER: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#;
const REL_BASE: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";
const SVG_BLIP_EXT: &str = "{96DAC541-7B7A-43D3-8B79-37D633B846F1}";
const CHART_NS: &str = "http://schemas.openxmlformats.org/drawingml/2006/chart";

/// Configuration for PPTX generation
pub struct PptxConfig {
    pub title: String,
    pub creator: String,
    /// Slide width in inches.
    pub slide_width: f64,
    /// Slide height in inches.
    pub slide_height: f64,
}

impl Default for PptxConfig {
    fn default() -> Self {
        Self {
            title: "Presentation".to_string(),
            creator: "deck-blocks".to_string(),
            slide_width: 10.0,
            slide_height: 5.63,
        }
    }
}

/// A relationship from a slide part to another part.
struct Relationship {
    id: String,
    kind: &'static str,
    target: String,
}

/// A fully rendered slide part plus what it references.
struct SlidePart {
    xml: String,
    rels: Vec<Relationship>,
    media: Vec<(String, Vec<u8>)>,
    /// Chart parts as (package-wide chart number, chartSpace xml).
    charts: Vec<(usize, String)>,
}

/// Generate a PPTX presentation from rendered slides.
///
/// The package is written to a temporary sibling first and renamed into
/// place, so readers never observe a partial file.
pub fn generate_pptx(slides: &[Slide], output_file: &Path, config: &PptxConfig) -> Result<()> {
    info!("Generating PPTX with {} slides", slides.len());

    if slides.is_empty() {
        return Err(DeckError::ValidationError(
            "A presentation needs at least one slide".to_string(),
        ));
    }

    utils::ensure_parent_directory_exists(output_file)?;

    let temp_path = utils::temp_sibling_path(output_file);
    let file = fs::File::create(&temp_path).map_err(DeckError::FileReadError)?;

    if let Err(e) = write_pptx(file, slides, config) {
        if let Err(cleanup) = fs::remove_file(&temp_path) {
            warn!("Failed to clean up temp file {:?}: {}", temp_path, cleanup);
        }
        return Err(e);
    }

    fs::rename(&temp_path, output_file).map_err(DeckError::FileReadError)?;
    info!("PPTX file created at {:?}", output_file);
    Ok(())
}

/// Write a complete PPTX package to `writer` and hand the writer back.
pub fn write_pptx<W: Write + Seek>(writer: W, slides: &[Slide], config: &PptxConfig) -> Result<W> {
    let mut zip = ZipWriter::new(writer);
    let cx = inches_to_emu(config.slide_width);
    let cy = inches_to_emu(config.slide_height);

    // Render slide parts first so media and chart names are known before content types
    let mut counters = PartCounters::default();
    let parts: Vec<SlidePart> = slides
        .iter()
        .enumerate()
        .map(|(i, slide)| render_slide(i + 1, slide, &mut counters))
        .collect();

    info!("Creating PPTX structure: [Content_Types].xml");
    zip.start_file("[Content_Types].xml", FileOptions::default())?;
    zip.write_all(content_types_xml(slides.len(), counters.charts).as_bytes())?;

    info!("Creating PPTX structure: _rels/.rels");
    zip.start_file("_rels/.rels", FileOptions::default())?;
    let rels = format!(
        r#"{XML_HEADER}
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
    <Relationship Id="rId1" Type="{REL_BASE}/officeDocument" Target="ppt/presentation.xml"/>
    <Relationship Id="rId2" Type="http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties" Target="docProps/core.xml"/>
    <Relationship Id="rId3" Type="{REL_BASE}/extended-properties" Target="docProps/app.xml"/>
</Relationships>"#
    );
    zip.write_all(rels.as_bytes())?;

    info!("Creating PPTX structure: docProps/app.xml");
    zip.start_file("docProps/app.xml", FileOptions::default())?;
    let app_xml = format!(
        r#"{XML_HEADER}
<Properties xmlns="http://schemas.openxmlformats.org/officeDocument/2006/extended-properties" xmlns:vt="http://schemas.openxmlformats.org/officeDocument/2006/docPropsVTypes">
    <Application>{}</Application>
    <Slides>{}</Slides>
</Properties>"#,
        escape(config.creator.as_str()),
        slides.len()
    );
    zip.write_all(app_xml.as_bytes())?;

    info!("Creating PPTX structure: docProps/core.xml");
    zip.start_file("docProps/core.xml", FileOptions::default())?;
    let now = chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ");
    let core_xml = format!(
        r#"{XML_HEADER}
<cp:coreProperties xmlns:cp="http://schemas.openxmlformats.org/package/2006/metadata/core-properties" xmlns:dc="http://purl.org/dc/elements/1.1/" xmlns:dcterms="http://purl.org/dc/terms/" xmlns:dcmitype="http://purl.org/dc/dcmitype/" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">
    <dc:title>{title}</dc:title>
    <dc:creator>{creator}</dc:creator>
    <dcterms:created xsi:type="dcterms:W3CDTF">{now}</dcterms:created>
    <dcterms:modified xsi:type="dcterms:W3CDTF">{now}</dcterms:modified>
    <cp:revision>1</cp:revision>
</cp:coreProperties>"#,
        title = escape(config.title.as_str()),
        creator = escape(config.creator.as_str()),
        now = now
    );
    zip.write_all(core_xml.as_bytes())?;

    info!("Creating PPTX structure: ppt/_rels/presentation.xml.rels");
    zip.start_file("ppt/_rels/presentation.xml.rels", FileOptions::default())?;
    let mut pres_rels = format!(
        r#"{XML_HEADER}
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
    <Relationship Id="rId1" Type="{REL_BASE}/slideMaster" Target="slideMasters/slideMaster1.xml"/>
    <Relationship Id="rId2" Type="{REL_BASE}/theme" Target="theme/theme1.xml"/>
"#
    );
    for i in 0..slides.len() {
        pres_rels.push_str(&format!(
            r#"    <Relationship Id="rId{}" Type="{REL_BASE}/slide" Target="slides/slide{}.xml"/>"#,
            i + 3,
            i + 1
        ));
        pres_rels.push('\n');
    }
    pres_rels.push_str("</Relationships>");
    zip.write_all(pres_rels.as_bytes())?;

    info!("Creating PPTX structure: ppt/presentation.xml");
    zip.start_file("ppt/presentation.xml", FileOptions::default())?;
    let presentation_xml = format!(
        r#"{XML_HEADER}
<p:presentation {NS_DECL} saveSubsetFonts="1">
    <p:sldMasterIdLst>
        <p:sldMasterId id="2147483648" r:id="rId1"/>
    </p:sldMasterIdLst>
    <p:sldIdLst>
{slide_ids}
    </p:sldIdLst>
    <p:sldSz cx="{cx}" cy="{cy}"/>
    <p:notesSz cx="6858000" cy="9144000"/>
</p:presentation>"#,
        slide_ids = (0..slides.len())
            .map(|i| format!(r#"        <p:sldId id="{}" r:id="rId{}"/>"#, 256 + i, i + 3))
            .collect::<Vec<String>>()
            .join("\n"),
    );
    zip.write_all(presentation_xml.as_bytes())?;

    info!("Creating PPTX structure: slide master, layout and theme");
    zip.start_file("ppt/slideMasters/slideMaster1.xml", FileOptions::default())?;
    zip.write_all(SLIDE_MASTER_XML.as_bytes())?;
    zip.start_file(
        "ppt/slideMasters/_rels/slideMaster1.xml.rels",
        FileOptions::default(),
    )?;
    zip.write_all(
        relationships_xml(&[
            Relationship {
                id: "rId1".to_string(),
                kind: "slideLayout",
                target: "../slideLayouts/slideLayout1.xml".to_string(),
            },
            Relationship {
                id: "rId2".to_string(),
                kind: "theme",
                target: "../theme/theme1.xml".to_string(),
            },
        ])
        .as_bytes(),
    )?;
    zip.start_file("ppt/slideLayouts/slideLayout1.xml", FileOptions::default())?;
    zip.write_all(SLIDE_LAYOUT_XML.as_bytes())?;
    zip.start_file(
        "ppt/slideLayouts/_rels/slideLayout1.xml.rels",
        FileOptions::default(),
    )?;
    zip.write_all(
        relationships_xml(&[Relationship {
            id: "rId1".to_string(),
            kind: "slideMaster",
            target: "../slideMasters/slideMaster1.xml".to_string(),
        }])
        .as_bytes(),
    )?;
    zip.start_file("ppt/theme/theme1.xml", FileOptions::default())?;
    zip.write_all(THEME_XML.as_bytes())?;

    for (i, part) in parts.iter().enumerate() {
        let slide_num = i + 1;

        for (name, bytes) in &part.media {
            info!("Adding media to PPTX: ppt/media/{}", name);
            zip.start_file(format!("ppt/media/{}", name), FileOptions::default())?;
            zip.write_all(bytes)?;
        }

        for (chart_num, xml) in &part.charts {
            info!("Adding chart to PPTX: ppt/charts/chart{}.xml", chart_num);
            zip.start_file(
                format!("ppt/charts/chart{}.xml", chart_num),
                FileOptions::default(),
            )?;
            zip.write_all(xml.as_bytes())?;
        }

        info!(
            "Creating slide relationships: ppt/slides/_rels/slide{}.xml.rels",
            slide_num
        );
        zip.start_file(
            format!("ppt/slides/_rels/slide{}.xml.rels", slide_num),
            FileOptions::default(),
        )?;
        zip.write_all(relationships_xml(&part.rels).as_bytes())?;

        info!("Creating slide XML: ppt/slides/slide{}.xml", slide_num);
        zip.start_file(
            format!("ppt/slides/slide{}.xml", slide_num),
            FileOptions::default(),
        )?;
        zip.write_all(part.xml.as_bytes())?;
    }

    info!("Finalizing PPTX file");
    Ok(zip.finish()?)
}

fn content_types_xml(slide_count: usize, chart_count: usize) -> String {
    let slides = (1..=slide_count)
        .map(|i| {
            format!(
                r#"    <Override PartName="/ppt/slides/slide{}.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.slide+xml"/>"#,
                i
            )
        })
        .chain((1..=chart_count).map(|i| {
            format!(
                r#"    <Override PartName="/ppt/charts/chart{}.xml" ContentType="application/vnd.openxmlformats-officedocument.drawingml.chart+xml"/>"#,
                i
            )
        }))
        .collect::<Vec<String>>()
        .join("\n");

    format!(
        r#"{XML_HEADER}
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
    <Default Extension="xml" ContentType="application/xml"/>
    <Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
    <Default Extension="png" ContentType="image/png"/>
    <Default Extension="svg" ContentType="image/svg+xml"/>
    <Default Extension="jpeg" ContentType="image/jpeg"/>
    <Default Extension="gif" ContentType="image/gif"/>
    <Default Extension="bin" ContentType="application/octet-stream"/>
    <Override PartName="/ppt/presentation.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.presentation.main+xml"/>
    <Override PartName="/ppt/slideMasters/slideMaster1.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.slideMaster+xml"/>
    <Override PartName="/ppt/slideLayouts/slideLayout1.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.slideLayout+xml"/>
    <Override PartName="/ppt/theme/theme1.xml" ContentType="application/vnd.openxmlformats-officedocument.theme+xml"/>
    <Override PartName="/docProps/core.xml" ContentType="application/vnd.openxmlformats-package.core-properties+xml"/>
    <Override PartName="/docProps/app.xml" ContentType="application/vnd.openxmlformats-officedocument.extended-properties+xml"/>
{slides}
</Types>"#
    )
}

fn relationships_xml(rels: &[Relationship]) -> String {
    let mut xml = format!(
        "{XML_HEADER}\n<Relationships xmlns=\"http://schemas.openxmlformats.org/package/2006/relationships\">\n"
    );
    for rel in rels {
        xml.push_str(&format!(
            r#"    <Relationship Id="{}" Type="{REL_BASE}/{}" Target="{}"/>"#,
            rel.id, rel.kind, rel.target
        ));
        xml.push('\n');
    }
    xml.push_str("</Relationships>");
    xml
}

/// Package-wide part numbering, shared across slides.
#[derive(Default)]
struct PartCounters {
    media: usize,
    charts: usize,
}

/// Render one slide. Images that cannot be decoded and charts without data
/// are dropped with a warning.
fn render_slide(slide_num: usize, slide: &Slide, counters: &mut PartCounters) -> SlidePart {
    let mut rels = vec![Relationship {
        id: "rId1".to_string(),
        kind: "slideLayout",
        target: "../slideLayouts/slideLayout1.xml".to_string(),
    }];
    let mut media = Vec::new();
    let mut charts = Vec::new();
    let mut shapes = String::new();
    // id 1 is the group shape itself
    let mut next_id = 2;

    for element in &slide.elements {
        let id = next_id;
        next_id += 1;

        match element {
            Element::Shape { kind, frame, style } => {
                shapes.push_str(&shape_xml(id, *kind, frame, style));
            }
            Element::Text { text, frame, style } => {
                shapes.push_str(&text_xml(id, text, frame, style));
            }
            Element::Table { rows, frame, style } => {
                shapes.push_str(&table_xml(id, rows, frame, style));
            }
            Element::Image { data, frame } => {
                let decoded = match media::decode_data_uri(data) {
                    Ok(decoded) => decoded,
                    Err(e) => {
                        warn!("Skipping image on slide {}: {}", slide_num, e);
                        continue;
                    }
                };
                match embed_media(decoded, &mut rels, &mut counters.media) {
                    Ok((files, blip)) => {
                        media.extend(files);
                        shapes.push_str(&picture_xml(id, frame, &blip));
                    }
                    Err(e) => warn!("Skipping image on slide {}: {}", slide_num, e),
                }
            }
            Element::Chart {
                kind,
                series,
                frame,
                style,
            } => {
                if series.iter().all(|s| s.values.is_empty()) {
                    warn!("Skipping chart without data on slide {}", slide_num);
                    continue;
                }
                counters.charts += 1;
                let rid = format!("rId{}", rels.len() + 1);
                rels.push(Relationship {
                    id: rid.clone(),
                    kind: "chart",
                    target: format!("../charts/chart{}.xml", counters.charts),
                });
                charts.push((counters.charts, chart_xml(*kind, series, style)));
                shapes.push_str(&chart_frame_xml(id, frame, &rid));
            }
        }
    }

    let background = slide
        .background
        .as_deref()
        .map(|color| {
            format!(
                "<p:bg><p:bgPr><a:solidFill>{}</a:solidFill><a:effectLst/></p:bgPr></p:bg>",
                srgb(color, None)
            )
        })
        .unwrap_or_default();

    let xml = format!(
        r#"{XML_HEADER}
<p:sld {NS_DECL}><p:cSld>{background}<p:spTree><p:nvGrpSpPr><p:cNvPr id="1" name=""/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr><p:grpSpPr><a:xfrm><a:off x="0" y="0"/><a:ext cx="0" cy="0"/><a:chOff x="0" y="0"/><a:chExt cx="0" cy="0"/></a:xfrm></p:grpSpPr>{shapes}</p:spTree></p:cSld><p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr></p:sld>"#
    );

    SlidePart {
        xml,
        rels,
        media,
        charts,
    }
}

/// Blip markup for an image: the raster relationship, plus the SVG one if any.
struct Blip {
    raster_rid: String,
    svg_rid: Option<String>,
}

type MediaFiles = Vec<(String, Vec<u8>)>;

fn embed_media(
    decoded: MediaData,
    rels: &mut Vec<Relationship>,
    media_counter: &mut usize,
) -> Result<(MediaFiles, Blip)> {
    let mut add = |ext: &str, bytes: Vec<u8>, files: &mut MediaFiles| {
        *media_counter += 1;
        let name = format!("image{}.{}", media_counter, ext);
        let id = format!("rId{}", rels.len() + 1);
        rels.push(Relationship {
            id: id.clone(),
            kind: "image",
            target: format!("../media/{}", name),
        });
        files.push((name, bytes));
        id
    };

    let mut files = Vec::new();
    if decoded.is_svg() {
        let png = media::rasterize_svg(&decoded.bytes, FALLBACK_PX)?;
        let raster_rid = add("png", png, &mut files);
        let svg_rid = add("svg", decoded.bytes, &mut files);
        Ok((
            files,
            Blip {
                raster_rid,
                svg_rid: Some(svg_rid),
            },
        ))
    } else {
        let ext = decoded.extension().to_string();
        let raster_rid = add(&ext, decoded.bytes, &mut files);
        Ok((
            files,
            Blip {
                raster_rid,
                svg_rid: None,
            },
        ))
    }
}

fn srgb(color: &str, alpha: Option<i64>) -> String {
    let hex = color.trim_start_matches('#').to_uppercase();
    match alpha {
        Some(alpha) => format!(
            r#"<a:srgbClr val="{}"><a:alpha val="{}"/></a:srgbClr>"#,
            escape(hex.as_str()),
            alpha
        ),
        None => format!(r#"<a:srgbClr val="{}"/>"#, escape(hex.as_str())),
    }
}

fn xfrm(frame: &Frame) -> String {
    format!(
        r#"<a:xfrm><a:off x="{}" y="{}"/><a:ext cx="{}" cy="{}"/></a:xfrm>"#,
        inches_to_emu(frame.x),
        inches_to_emu(frame.y),
        inches_to_emu(frame.w),
        inches_to_emu(frame.h)
    )
}

/// Rounded-corner adjustment, as a fraction of the shorter side (max 50000).
fn corner_adjust(radius: f64, frame: &Frame) -> i64 {
    let shorter = frame.w.min(frame.h);
    if shorter <= 0.0 {
        return 0;
    }
    ((radius / shorter) * 100_000.0).round().clamp(0.0, 50_000.0) as i64
}

fn shape_xml(id: usize, kind: ShapeKind, frame: &Frame, style: &ShapeStyle) -> String {
    let adjust = match (kind, style.rect_radius) {
        (ShapeKind::RoundRect, Some(radius)) => format!(
            r#"<a:gd name="adj" fmla="val {}"/>"#,
            corner_adjust(radius, frame)
        ),
        _ => String::new(),
    };

    let fill = match &style.fill {
        Some(fill) if fill.transparency > 0 => format!(
            "<a:solidFill>{}</a:solidFill>",
            srgb(&fill.color, Some((100 - i64::from(fill.transparency)) * 1000))
        ),
        Some(fill) => format!("<a:solidFill>{}</a:solidFill>", srgb(&fill.color, None)),
        None => "<a:noFill/>".to_string(),
    };

    let line = match &style.line {
        Some(line) => format!(
            r#"<a:ln w="{}"><a:solidFill>{}</a:solidFill></a:ln>"#,
            points_to_emu(line.width),
            srgb(&line.color, None)
        ),
        None => "<a:ln><a:noFill/></a:ln>".to_string(),
    };

    let effects = match &style.shadow {
        Some(shadow) => format!(
            r#"<a:effectLst><a:outerShdw blurRad="{}" dist="{}" dir="2700000" algn="bl" rotWithShape="0">{}</a:outerShdw></a:effectLst>"#,
            points_to_emu(shadow.blur),
            points_to_emu(shadow.offset),
            srgb(
                &shadow.color,
                Some((shadow.opacity.clamp(0.0, 1.0) * 100_000.0).round() as i64)
            )
        ),
        None => String::new(),
    };

    format!(
        r#"<p:sp><p:nvSpPr><p:cNvPr id="{id}" name="Shape {id}"/><p:cNvSpPr/><p:nvPr/></p:nvSpPr><p:spPr>{xfrm}<a:prstGeom prst="{prst}"><a:avLst>{adjust}</a:avLst></a:prstGeom>{fill}{line}{effects}</p:spPr></p:sp>"#,
        xfrm = xfrm(frame),
        prst = kind.preset(),
    )
}

fn run_properties(style: &TextStyle) -> String {
    let spacing = style
        .letter_spacing
        .map(|points| format!(r#" spc="{}""#, (points * 100.0).round() as i64))
        .unwrap_or_default();
    let face = escape(style.font_face.as_str());

    format!(
        r#"<a:rPr lang="en-US" sz="{size}" b="{b}" i="{i}"{spacing} dirty="0"><a:solidFill>{color}</a:solidFill><a:latin typeface="{face}"/><a:ea typeface="{face}"/><a:cs typeface="{face}"/></a:rPr>"#,
        size = (style.font_size * 100.0).round() as i64,
        b = u8::from(style.bold),
        i = u8::from(style.italic),
        color = srgb(&style.color, None),
    )
}

fn text_xml(id: usize, text: &str, frame: &Frame, style: &TextStyle) -> String {
    let anchor = match style.valign {
        VAlign::Top => "t",
        VAlign::Middle => "ctr",
        VAlign::Bottom => "b",
    };
    let align = match style.align {
        Align::Left => "l",
        Align::Center => "ctr",
        Align::Right => "r",
    };
    let paragraph_props = match style.line_spacing {
        Some(multiple) => format!(
            r#"<a:pPr algn="{align}"><a:lnSpc><a:spcPct val="{}"/></a:lnSpc></a:pPr>"#,
            (multiple * 100_000.0).round() as i64
        ),
        None => format!(r#"<a:pPr algn="{align}"/>"#),
    };
    let run_props = run_properties(style);

    let paragraphs: String = text
        .split('\n')
        .map(|line| {
            format!(
                "<a:p>{paragraph_props}<a:r>{run_props}<a:t>{}</a:t></a:r></a:p>",
                escape(line)
            )
        })
        .collect();

    format!(
        r#"<p:sp><p:nvSpPr><p:cNvPr id="{id}" name="Text {id}"/><p:cNvSpPr txBox="1"/><p:nvPr/></p:nvSpPr><p:spPr>{xfrm}<a:prstGeom prst="rect"><a:avLst/></a:prstGeom><a:noFill/></p:spPr><p:txBody><a:bodyPr wrap="square" lIns="91440" tIns="45720" rIns="91440" bIns="45720" rtlCol="0" anchor="{anchor}"><a:noAutofit/></a:bodyPr><a:lstStyle/>{paragraphs}</p:txBody></p:sp>"#,
        xfrm = xfrm(frame),
    )
}

fn picture_xml(id: usize, frame: &Frame, blip: &Blip) -> String {
    let extension = blip
        .svg_rid
        .as_ref()
        .map(|rid| {
            format!(
                r#"<a:extLst><a:ext uri="{SVG_BLIP_EXT}"><asvg:svgBlip xmlns:asvg="http://schemas.microsoft.com/office/drawing/2016/SVG/main" r:embed="{rid}"/></a:ext></a:extLst>"#
            )
        })
        .unwrap_or_default();

    format!(
        r#"<p:pic><p:nvPicPr><p:cNvPr id="{id}" name="Picture {id}"/><p:cNvPicPr><a:picLocks noChangeAspect="1"/></p:cNvPicPr><p:nvPr/></p:nvPicPr><p:blipFill><a:blip r:embed="{rid}">{extension}</a:blip><a:stretch><a:fillRect/></a:stretch></p:blipFill><p:spPr>{xfrm}<a:prstGeom prst="rect"><a:avLst/></a:prstGeom></p:spPr></p:pic>"#,
        rid = blip.raster_rid,
        xfrm = xfrm(frame),
    )
}

fn table_xml(id: usize, rows: &[Vec<String>], frame: &Frame, style: &TableStyle) -> String {
    let cols = rows.iter().map(Vec::len).max().unwrap_or(0).max(1);
    let widths: Vec<f64> = match &style.col_widths {
        Some(widths) if widths.len() == cols => widths.clone(),
        _ => vec![frame.w / cols as f64; cols],
    };
    let total_w: f64 = widths.iter().sum();
    let total_h = style.row_height * rows.len() as f64;

    let grid: String = widths
        .iter()
        .map(|w| format!(r#"<a:gridCol w="{}"/>"#, inches_to_emu(*w)))
        .collect();

    let border = |edge: &str| {
        format!(
            r#"<a:{edge} w="{}"><a:solidFill>{}</a:solidFill></a:{edge}>"#,
            points_to_emu(style.border_width),
            srgb(&style.border_color, None)
        )
    };
    let [top, right, bottom, left] = style.margin;
    let cell_props = format!(
        r#"<a:tcPr marL="{}" marR="{}" marT="{}" marB="{}" anchor="ctr">{}{}{}{}<a:solidFill>{}</a:solidFill></a:tcPr>"#,
        points_to_emu(left),
        points_to_emu(right),
        points_to_emu(top),
        points_to_emu(bottom),
        border("lnL"),
        border("lnR"),
        border("lnT"),
        border("lnB"),
        srgb(&style.fill, None)
    );

    let body_style = TextStyle::new(style.font_size, &style.text_color, &style.font_face);
    let header_style = TextStyle::new(style.font_size, &style.header_color, &style.font_face).bold(true);

    let mut table_rows = String::new();
    for (r, row) in rows.iter().enumerate() {
        let run_props = run_properties(if r == 0 { &header_style } else { &body_style });
        table_rows.push_str(&format!(
            r#"<a:tr h="{}">"#,
            inches_to_emu(style.row_height)
        ));
        for c in 0..cols {
            let text = row.get(c).map(String::as_str).unwrap_or("");
            table_rows.push_str(&format!(
                "<a:tc><a:txBody><a:bodyPr/><a:lstStyle/><a:p><a:r>{run_props}<a:t>{}</a:t></a:r></a:p></a:txBody>{cell_props}</a:tc>",
                escape(text)
            ));
        }
        table_rows.push_str("</a:tr>");
    }

    format!(
        r#"<p:graphicFrame><p:nvGraphicFramePr><p:cNvPr id="{id}" name="Table {id}"/><p:cNvGraphicFramePr><a:graphicFrameLocks noGrp="1"/></p:cNvGraphicFramePr><p:nvPr/></p:nvGraphicFramePr><p:xfrm><a:off x="{x}" y="{y}"/><a:ext cx="{cx}" cy="{cy}"/></p:xfrm><a:graphic><a:graphicData uri="http://schemas.openxmlformats.org/drawingml/2006/table"><a:tbl><a:tblPr firstRow="1"/><a:tblGrid>{grid}</a:tblGrid>{table_rows}</a:tbl></a:graphicData></a:graphic></p:graphicFrame>"#,
        x = inches_to_emu(frame.x),
        y = inches_to_emu(frame.y),
        cx = inches_to_emu(total_w),
        cy = inches_to_emu(total_h),
    )
}

fn chart_frame_xml(id: usize, frame: &Frame, rid: &str) -> String {
    format!(
        r#"<p:graphicFrame><p:nvGraphicFramePr><p:cNvPr id="{id}" name="Chart {id}"/><p:cNvGraphicFramePr><a:graphicFrameLocks noGrp="1"/></p:cNvGraphicFramePr><p:nvPr/></p:nvGraphicFramePr><p:xfrm><a:off x="{x}" y="{y}"/><a:ext cx="{cx}" cy="{cy}"/></p:xfrm><a:graphic><a:graphicData uri="{CHART_NS}"><c:chart xmlns:c="{CHART_NS}" r:id="{rid}"/></a:graphicData></a:graphic></p:graphicFrame>"#,
        x = inches_to_emu(frame.x),
        y = inches_to_emu(frame.y),
        cx = inches_to_emu(frame.w),
        cy = inches_to_emu(frame.h),
    )
}

/// Text properties for chart labels: size in points, one color, one face.
fn chart_text(size: f64, color: &str, face: &str) -> String {
    format!(
        r#"<c:txPr><a:bodyPr/><a:lstStyle/><a:p><a:pPr><a:defRPr sz="{}"><a:solidFill>{}</a:solidFill><a:latin typeface="{face}"/></a:defRPr></a:pPr><a:endParaRPr lang="en-US"/></a:p></c:txPr>"#,
        (size * 100.0).round() as i64,
        srgb(color, None),
        face = escape(face),
    )
}

/// Cached category and value literals, so the chart renders without an
/// embedded workbook.
fn series_data(series: &ChartSeries) -> String {
    let labels: String = series
        .labels
        .iter()
        .enumerate()
        .map(|(i, label)| format!(r#"<c:pt idx="{i}"><c:v>{}</c:v></c:pt>"#, escape(label.as_str())))
        .collect();
    let values: String = series
        .values
        .iter()
        .enumerate()
        .map(|(i, value)| format!(r#"<c:pt idx="{i}"><c:v>{value}</c:v></c:pt>"#))
        .collect();

    format!(
        r#"<c:cat><c:strLit><c:ptCount val="{}"/>{labels}</c:strLit></c:cat><c:val><c:numLit><c:formatCode>General</c:formatCode><c:ptCount val="{}"/>{values}</c:numLit></c:val>"#,
        series.labels.len(),
        series.values.len(),
    )
}

fn cycled<'a>(colors: &'a [String], i: usize) -> &'a str {
    if colors.is_empty() {
        "000000"
    } else {
        colors[i % colors.len()].as_str()
    }
}

fn chart_series_xml(kind: ChartKind, i: usize, series: &ChartSeries, style: &ChartStyle) -> String {
    let color = srgb(cycled(&style.colors, i), None);
    let head = format!(
        r#"<c:idx val="{i}"/><c:order val="{i}"/><c:tx><c:v>{}</c:v></c:tx>"#,
        escape(series.name.as_str())
    );
    let data = series_data(series);

    match kind {
        ChartKind::Bar => format!(
            r#"<c:ser>{head}<c:spPr><a:solidFill>{color}</a:solidFill></c:spPr><c:invertIfNegative val="0"/>{data}</c:ser>"#
        ),
        ChartKind::Line => format!(
            r#"<c:ser>{head}<c:spPr><a:ln w="28575"><a:solidFill>{color}</a:solidFill></a:ln></c:spPr><c:marker><c:symbol val="circle"/><c:size val="6"/><c:spPr><a:solidFill>{color}</a:solidFill></c:spPr></c:marker>{data}<c:smooth val="0"/></c:ser>"#
        ),
        ChartKind::Pie => {
            let slices: String = (0..series.values.len())
                .map(|j| {
                    format!(
                        r#"<c:dPt><c:idx val="{j}"/><c:bubble3D val="0"/><c:spPr><a:solidFill>{}</a:solidFill></c:spPr></c:dPt>"#,
                        srgb(cycled(&style.colors, j), None)
                    )
                })
                .collect();
            format!(r#"<c:ser>{head}{slices}{data}</c:ser>"#)
        }
    }
}

fn chart_xml(kind: ChartKind, series: &[ChartSeries], style: &ChartStyle) -> String {
    let series_xml: String = series
        .iter()
        .enumerate()
        .map(|(i, s)| chart_series_xml(kind, i, s, style))
        .collect();

    let labels = format!(
        r#"<c:dLbls><c:spPr><a:noFill/><a:ln><a:noFill/></a:ln></c:spPr>{}<c:showLegendKey val="0"/><c:showVal val="{}"/><c:showCatName val="0"/><c:showSerName val="0"/><c:showPercent val="0"/><c:showBubbleSize val="0"/></c:dLbls>"#,
        chart_text(style.value_font_size, &style.data_label_color, &style.font_face),
        u8::from(style.show_values),
    );

    let axis_text = chart_text(style.axis_font_size, &style.axis_label_color, &style.font_face);
    // Value labels run one point smaller than category labels
    let value_axis_text = chart_text(
        (style.axis_font_size - 1.0).max(1.0),
        &style.axis_label_color,
        &style.font_face,
    );
    let axes = format!(
        r#"<c:catAx><c:axId val="1"/><c:scaling><c:orientation val="minMax"/></c:scaling><c:delete val="0"/><c:axPos val="b"/><c:numFmt formatCode="General" sourceLinked="0"/><c:majorTickMark val="none"/><c:minorTickMark val="none"/><c:tickLblPos val="nextTo"/><c:spPr><a:ln><a:noFill/></a:ln></c:spPr>{axis_text}<c:crossAx val="2"/><c:crosses val="autoZero"/><c:auto val="1"/><c:lblAlgn val="ctr"/><c:lblOffset val="100"/></c:catAx><c:valAx><c:axId val="2"/><c:scaling><c:orientation val="minMax"/></c:scaling><c:delete val="0"/><c:axPos val="l"/><c:majorGridlines><c:spPr><a:ln w="9525"><a:solidFill>{grid}</a:solidFill></a:ln></c:spPr></c:majorGridlines><c:numFmt formatCode="General" sourceLinked="0"/><c:majorTickMark val="none"/><c:minorTickMark val="none"/><c:tickLblPos val="nextTo"/><c:spPr><a:ln><a:noFill/></a:ln></c:spPr>{value_axis_text}<c:crossAx val="1"/><c:crosses val="autoZero"/><c:crossBetween val="between"/></c:valAx>"#,
        grid = srgb(&style.grid_color, None),
    );

    let plot = match kind {
        ChartKind::Bar => format!(
            r#"<c:barChart><c:barDir val="col"/><c:grouping val="clustered"/><c:varyColors val="0"/>{series_xml}{labels}<c:gapWidth val="150"/><c:axId val="1"/><c:axId val="2"/></c:barChart>{axes}"#
        ),
        ChartKind::Line => format!(
            r#"<c:lineChart><c:grouping val="standard"/><c:varyColors val="0"/>{series_xml}{labels}<c:marker val="1"/><c:axId val="1"/><c:axId val="2"/></c:lineChart>{axes}"#
        ),
        ChartKind::Pie => format!(
            r#"<c:pieChart><c:varyColors val="1"/>{series_xml}{labels}<c:firstSliceAng val="0"/></c:pieChart>"#
        ),
    };

    let legend = if kind == ChartKind::Pie || series.len() > 1 {
        format!(
            r#"<c:legend><c:legendPos val="b"/><c:overlay val="0"/>{axis_text}</c:legend>"#
        )
    } else {
        String::new()
    };

    format!(
        r#"{XML_HEADER}
<c:chartSpace xmlns:c="{CHART_NS}" xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" xmlns:r="{REL_BASE}"><c:roundedCorners val="0"/><c:chart><c:autoTitleDeleted val="1"/><c:plotArea><c:layout/>{plot}<c:spPr><a:solidFill>{plot_fill}</a:solidFill></c:spPr></c:plotArea>{legend}<c:plotVisOnly val="1"/><c:dispBlanksAs val="gap"/></c:chart><c:spPr><a:noFill/><a:ln><a:noFill/></a:ln></c:spPr>{text}</c:chartSpace>"#,
        plot_fill = srgb(&style.plot_fill, None),
        text = chart_text(style.axis_font_size, &style.axis_label_color, &style.font_face),
    )
}

const SLIDE_MASTER_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<p:sldMaster xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main">
    <p:cSld>
        <p:bg><p:bgRef idx="1001"><a:schemeClr val="bg1"/></p:bgRef></p:bg>
        <p:spTree>
            <p:nvGrpSpPr><p:cNvPr id="1" name=""/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr>
            <p:grpSpPr/>
        </p:spTree>
    </p:cSld>
    <p:clrMap bg1="lt1" tx1="dk1" bg2="lt2" tx2="dk2" accent1="accent1" accent2="accent2" accent3="accent3" accent4="accent4" accent5="accent5" accent6="accent6" hlink="hlink" folHlink="folHlink"/>
    <p:sldLayoutIdLst>
        <p:sldLayoutId id="2147483649" r:id="rId1"/>
    </p:sldLayoutIdLst>
    <p:txStyles><p:titleStyle/><p:bodyStyle/><p:otherStyle/></p:txStyles>
</p:sldMaster>"#;

const SLIDE_LAYOUT_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<p:sldLayout xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main" type="blank" preserve="1">
    <p:cSld name="Blank">
        <p:spTree>
            <p:nvGrpSpPr><p:cNvPr id="1" name=""/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr>
            <p:grpSpPr/>
        </p:spTree>
    </p:cSld>
    <p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr>
</p:sldLayout>"#;

const THEME_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<a:theme xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" name="Deck Blocks">
    <a:themeElements>
        <a:clrScheme name="Deck Blocks">
            <a:dk1><a:srgbClr val="000000"/></a:dk1>
            <a:lt1><a:srgbClr val="FFFFFF"/></a:lt1>
            <a:dk2><a:srgbClr val="0D1B2A"/></a:dk2>
            <a:lt2><a:srgbClr val="E8ECF0"/></a:lt2>
            <a:accent1><a:srgbClr val="00A8E8"/></a:accent1>
            <a:accent2><a:srgbClr val="FFB800"/></a:accent2>
            <a:accent3><a:srgbClr val="38A169"/></a:accent3>
            <a:accent4><a:srgbClr val="805AD5"/></a:accent4>
            <a:accent5><a:srgbClr val="319795"/></a:accent5>
            <a:accent6><a:srgbClr val="E53E3E"/></a:accent6>
            <a:hlink><a:srgbClr val="3182CE"/></a:hlink>
            <a:folHlink><a:srgbClr val="805AD5"/></a:folHlink>
        </a:clrScheme>
        <a:fontScheme name="Deck Blocks">
            <a:majorFont><a:latin typeface="Helvetica Neue"/><a:ea typeface=""/><a:cs typeface=""/></a:majorFont>
            <a:minorFont><a:latin typeface="Helvetica Neue"/><a:ea typeface=""/><a:cs typeface=""/></a:minorFont>
        </a:fontScheme>
        <a:fmtScheme name="Deck Blocks">
            <a:fillStyleLst>
                <a:solidFill><a:schemeClr val="phClr"/></a:solidFill>
                <a:solidFill><a:schemeClr val="phClr"/></a:solidFill>
                <a:solidFill><a:schemeClr val="phClr"/></a:solidFill>
            </a:fillStyleLst>
            <a:lnStyleLst>
                <a:ln w="6350"><a:solidFill><a:schemeClr val="phClr"/></a:solidFill></a:ln>
                <a:ln w="12700"><a:solidFill><a:schemeClr val="phClr"/></a:solidFill></a:ln>
                <a:ln w="19050"><a:solidFill><a:schemeClr val="phClr"/></a:solidFill></a:ln>
            </a:lnStyleLst>
            <a:effectStyleLst>
                <a:effectStyle><a:effectLst/></a:effectStyle>
                <a:effectStyle><a:effectLst/></a:effectStyle>
                <a:effectStyle><a:effectLst/></a:effectStyle>
            </a:effectStyleLst>
            <a:bgFillStyleLst>
                <a:solidFill><a:schemeClr val="phClr"/></a:solidFill>
                <a:solidFill><a:schemeClr val="phClr"/></a:solidFill>
                <a:solidFill><a:schemeClr val="phClr"/></a:solidFill>
            </a:bgFillStyleLst>
        </a:fmtScheme>
    </a:themeElements>
    <a:objectDefaults/>
    <a:extraClrSchemeLst/>
</a:theme>"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::{Shadow, SlideSink};
    use crate::svg::to_data_uri;
    use std::io::{Cursor, Read};
    use zip::ZipArchive;

    fn read_entry(archive: &mut ZipArchive<Cursor<Vec<u8>>>, name: &str) -> String {
        let mut entry = archive.by_name(name).unwrap();
        let mut text = String::new();
        entry.read_to_string(&mut text).unwrap();
        text
    }

    fn build(slides: &[Slide]) -> ZipArchive<Cursor<Vec<u8>>> {
        let cursor = write_pptx(Cursor::new(Vec::new()), slides, &PptxConfig::default()).unwrap();
        ZipArchive::new(Cursor::new(cursor.into_inner())).unwrap()
    }

    #[test]
    fn writes_package_skeleton() {
        let mut archive = build(&[Slide::new(), Slide::new()]);

        for name in [
            "[Content_Types].xml",
            "_rels/.rels",
            "docProps/core.xml",
            "ppt/presentation.xml",
            "ppt/slideMasters/slideMaster1.xml",
            "ppt/slideLayouts/slideLayout1.xml",
            "ppt/theme/theme1.xml",
            "ppt/slides/slide1.xml",
            "ppt/slides/slide2.xml",
        ] {
            assert!(archive.by_name(name).is_ok(), "missing {}", name);
        }

        let presentation = read_entry(&mut archive, "ppt/presentation.xml");
        assert!(presentation.contains(r#"<p:sldSz cx="9144000" cy="5148072"/>"#));
        assert!(presentation.contains(r#"<p:sldId id="257" r:id="rId4"/>"#));
    }

    #[test]
    fn shapes_and_text_become_drawingml() {
        let mut slide = Slide::new();
        slide.set_background("0D1B2A");
        slide.add_shape(
            ShapeKind::RoundRect,
            Frame::new(1.0, 1.0, 2.0, 1.0),
            ShapeStyle::filled("#00a8e8")
                .transparency(50)
                .outline("FFB800", 1.0)
                .radius(0.1)
                .shadow(Shadow::outer(8.0, 3.0)),
        );
        slide.add_text(
            "Risk & Reward\nsecond line",
            Frame::new(0.5, 0.5, 4.0, 0.5),
            TextStyle::new(11.0, "FFFFFF", "Helvetica Neue")
                .bold(true)
                .centered()
                .letter_spacing(2.0),
        );

        let mut archive = build(&[slide]);
        let xml = read_entry(&mut archive, "ppt/slides/slide1.xml");

        assert!(xml.contains(r#"<p:bg><p:bgPr><a:solidFill><a:srgbClr val="0D1B2A"/>"#));
        assert!(xml.contains(r#"<a:prstGeom prst="roundRect"><a:avLst><a:gd name="adj" fmla="val 10000"/>"#));
        assert!(xml.contains(r#"<a:srgbClr val="00A8E8"><a:alpha val="50000"/></a:srgbClr>"#));
        assert!(xml.contains(r#"<a:ln w="12700">"#));
        assert!(xml.contains(r#"<a:outerShdw blurRad="101600" dist="38100""#));
        assert!(xml.contains("<a:t>Risk &amp; Reward</a:t>"));
        assert!(xml.contains("<a:t>second line</a:t>"));
        assert!(xml.contains(r#"sz="1100" b="1" i="0" spc="200""#));
        assert!(xml.contains(r#"anchor="ctr""#));
    }

    #[test]
    fn svg_images_get_png_fallback() {
        let svg = r##"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 24 24" width="64" height="64"><circle cx="12" cy="12" r="10" fill="#FFFFFF"/></svg>"##;
        let mut slide = Slide::new();
        slide.add_image(&to_data_uri(svg), Frame::square(1.0, 1.0, 0.5));

        let mut archive = build(&[slide]);
        assert!(archive.by_name("ppt/media/image1.png").is_ok());
        assert_eq!(read_entry(&mut archive, "ppt/media/image2.svg"), svg);

        let rels = read_entry(&mut archive, "ppt/slides/_rels/slide1.xml.rels");
        assert!(rels.contains(r#"Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/image" Target="../media/image1.png""#));
        assert!(rels.contains(r#"Target="../media/image2.svg""#));

        let xml = read_entry(&mut archive, "ppt/slides/slide1.xml");
        assert!(xml.contains(r#"<a:blip r:embed="rId2">"#));
        assert!(xml.contains(r#"<asvg:svgBlip xmlns:asvg="http://schemas.microsoft.com/office/drawing/2016/SVG/main" r:embed="rId3"/>"#));
    }

    #[test]
    fn undecodable_images_are_skipped() {
        let mut slide = Slide::new();
        slide.add_image("not a data uri", Frame::square(0.0, 0.0, 1.0));

        let mut archive = build(&[slide]);
        let xml = read_entry(&mut archive, "ppt/slides/slide1.xml");
        assert!(!xml.contains("<p:pic>"));
    }

    #[test]
    fn tables_have_header_and_grid() {
        let mut slide = Slide::new();
        slide.add_table(
            &[
                vec!["Metric".to_string(), "Value".to_string()],
                vec!["Latency".to_string()],
            ],
            Frame::new(0.4, 1.3, 9.2, 0.0),
            TableStyle {
                col_widths: Some(vec![6.0, 3.2]),
                row_height: 0.4,
                border_color: "1E3A5F".to_string(),
                border_width: 0.5,
                fill: "1B2838".to_string(),
                header_color: "00A8E8".to_string(),
                text_color: "E8ECF0".to_string(),
                font_face: "Helvetica Neue".to_string(),
                font_size: 10.0,
                margin: [4.0, 6.0, 4.0, 6.0],
            },
        );

        let mut archive = build(&[slide]);
        let xml = read_entry(&mut archive, "ppt/slides/slide1.xml");

        assert!(xml.contains(r#"<a:gridCol w="5486400"/><a:gridCol w="2926080"/>"#));
        assert_eq!(xml.matches("<a:tc>").count(), 4);
        assert!(xml.contains(r#"sz="1000" b="1""#));
        assert!(xml.contains(r#"marL="76200""#));
    }

    fn chart_style() -> ChartStyle {
        ChartStyle {
            colors: vec!["00A8E8".to_string(), "FFB800".to_string()],
            plot_fill: "1B2838".to_string(),
            axis_label_color: "8899AA".to_string(),
            grid_color: "1E3A5F".to_string(),
            data_label_color: "E8ECF0".to_string(),
            font_face: "Helvetica Neue".to_string(),
            show_values: true,
            value_font_size: 9.0,
            axis_font_size: 9.0,
        }
    }

    #[test]
    fn charts_become_chart_parts() {
        let series = vec![ChartSeries {
            name: "Revenue".to_string(),
            labels: vec!["Q1".to_string(), "Q2 & Q3".to_string()],
            values: vec![12.0, 7.5],
        }];
        let mut first = Slide::new();
        first.add_chart(ChartKind::Bar, &series, Frame::new(0.4, 1.2, 4.8, 3.5), chart_style());
        let mut second = Slide::new();
        second.add_chart(ChartKind::Pie, &series, Frame::new(0.4, 1.2, 9.2, 3.5), chart_style());

        let mut archive = build(&[first, second]);

        let types = read_entry(&mut archive, "[Content_Types].xml");
        assert!(types.contains(r#"<Override PartName="/ppt/charts/chart1.xml" ContentType="application/vnd.openxmlformats-officedocument.drawingml.chart+xml"/>"#));
        assert!(types.contains(r#"PartName="/ppt/charts/chart2.xml""#));

        let rels = read_entry(&mut archive, "ppt/slides/_rels/slide2.xml.rels");
        assert!(rels.contains(r#"Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/chart" Target="../charts/chart2.xml""#));

        let xml = read_entry(&mut archive, "ppt/slides/slide1.xml");
        assert!(xml.contains(r#"<a:graphicData uri="http://schemas.openxmlformats.org/drawingml/2006/chart"><c:chart xmlns:c="http://schemas.openxmlformats.org/drawingml/2006/chart" r:id="rId2"/>"#));
        assert!(xml.contains(r#"<a:ext cx="4389120" cy="3200400"/>"#));

        let bar = read_entry(&mut archive, "ppt/charts/chart1.xml");
        assert!(bar.contains(r#"<c:barDir val="col"/>"#));
        assert!(bar.contains("<c:tx><c:v>Revenue</c:v></c:tx>"));
        assert!(bar.contains(r#"<c:pt idx="1"><c:v>Q2 &amp; Q3</c:v></c:pt>"#));
        assert!(bar.contains(r#"<c:pt idx="0"><c:v>12</c:v></c:pt><c:pt idx="1"><c:v>7.5</c:v></c:pt>"#));
        assert!(bar.contains(r#"<c:showVal val="1"/>"#));
        assert!(bar.contains("<c:valAx>"));
        assert!(!bar.contains("<c:legend>"));

        let pie = read_entry(&mut archive, "ppt/charts/chart2.xml");
        assert!(pie.contains("<c:pieChart>"));
        assert!(pie.contains(r#"<c:dPt><c:idx val="1"/><c:bubble3D val="0"/><c:spPr><a:solidFill><a:srgbClr val="FFB800"/>"#));
        assert!(!pie.contains("<c:valAx>"));
        assert!(pie.contains("<c:legend>"));
    }

    #[test]
    fn charts_without_data_are_skipped() {
        let mut slide = Slide::new();
        slide.add_chart(ChartKind::Line, &[], Frame::new(0.4, 1.2, 9.2, 3.5), chart_style());

        let mut archive = build(&[slide]);
        assert!(archive.by_name("ppt/charts/chart1.xml").is_err());
        let types = read_entry(&mut archive, "[Content_Types].xml");
        assert!(!types.contains("/ppt/charts/"));
    }

    #[test]
    fn generate_pptx_replaces_target_atomically() {
        let dir = tempfile::TempDir::new().unwrap();
        let output = dir.path().join("nested").join("deck.pptx");

        generate_pptx(&[Slide::new()], &output, &PptxConfig::default()).unwrap();

        assert!(output.exists());
        let leftovers = fs::read_dir(output.parent().unwrap())
            .unwrap()
            .filter(|e| {
                e.as_ref()
                    .map(|e| e.file_name().to_string_lossy().ends_with(".tmp"))
                    .unwrap_or(false)
            })
            .count();
        assert_eq!(leftovers, 0);
    }

    #[test]
    fn empty_deck_is_rejected() {
        let dir = tempfile::TempDir::new().unwrap();
        let result = generate_pptx(&[], &dir.path().join("deck.pptx"), &PptxConfig::default());
        assert!(matches!(result, Err(DeckError::ValidationError(_))));
    }
}
