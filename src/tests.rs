use super::*;
use crate::icons::DEFAULT_VIEW_BOX;
use crate::sink::ShapeKind;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use std::fs;
use std::thread;
use tempfile::TempDir;

fn builtin_handles(icons: &IconCatalog) -> Vec<(String, String)> {
    icons
        .families()
        .into_iter()
        .flat_map(|family| {
            icons
                .icon_names(family)
                .unwrap_or_default()
                .into_iter()
                .map(move |name| (family.to_string(), name.to_string()))
        })
        .collect()
}

fn decode_markup(data: &str) -> String {
    let payload = data
        .strip_prefix("image/svg+xml;base64,")
        .expect("data URI should carry the SVG media type");
    String::from_utf8(STANDARD.decode(payload).unwrap()).unwrap()
}

#[test]
fn test_every_bundled_icon_serializes_deterministically() {
    let icons = IconCatalog::builtin().unwrap();
    let handles = builtin_handles(&icons);
    assert!(handles.len() >= 16);

    for (family, name) in &handles {
        let first = serialize(&icons.extract(family, name).unwrap(), "#00A8E8");
        let second = serialize(&icons.extract(family, name).unwrap(), "#00A8E8");
        assert_eq!(first, second, "{}/{} is not deterministic", family, name);
    }
}

#[test]
fn test_view_box_matches_source_or_default() {
    let icons = IconCatalog::builtin().unwrap();

    // Hero icons declare a 20-unit frame
    let hero = serialize(&icons.extract("hi", "HiCheck").unwrap(), "#000000");
    assert!(hero.contains(r#"viewBox="0 0 20 20""#));

    let mut catalog = IconCatalog::new();
    catalog
        .add_family_json(
            "test",
            r#"{"Dot": {"tag": "svg", "attr": {}, "child": [{"tag": "circle", "attr": {"cx": "12", "cy": "12", "r": "10"}, "child": []}]}}"#,
        )
        .unwrap();
    let markup = serialize(&catalog.extract("test", "Dot").unwrap(), "#FFFFFF");
    assert!(markup.contains(&format!(r#"viewBox="{}""#, DEFAULT_VIEW_BOX)));
    assert!(markup.contains(r##"<circle cx="12" cy="12" r="10" fill="#FFFFFF"/>"##));
}

#[test]
fn test_every_bundled_icon_places_as_one_image() {
    let icons = IconCatalog::builtin().unwrap();

    for (family, name) in builtin_handles(&icons) {
        let mut slide = Slide::new();
        let placement = place_icon(&mut slide, &icons, &family, &name, 1.0, 1.0, 0.5, "00A8E8");

        assert!(placement.is_image(), "{}/{} fell back", family, name);
        assert_eq!(slide.elements.len(), 1);
        let (data, frame) = slide.images().next().unwrap();
        assert_eq!(*frame, Frame::square(1.0, 1.0, 0.5));
        assert!(decode_markup(data).contains(r##"fill="#00A8E8""##) || decode_markup(data).contains(r##"stroke="#00A8E8""##));
    }
}

#[test]
fn test_lightning_bolt_example_falls_back() {
    let icons = IconCatalog::builtin().unwrap();

    let err = icons.extract("hi", "HiLightningBolt").unwrap_err();
    assert_eq!(
        err,
        IconError::NotFound {
            family: "hi".to_string(),
            icon: "HiLightningBolt".to_string()
        }
    );

    let mut slide = Slide::new();
    let placement = place_icon(&mut slide, &icons, "hi", "HiLightningBolt", 1.0, 1.0, 0.5, "00A8E8");

    assert_eq!(placement, Placement::Fallback(err));
    assert_eq!(slide.images().count(), 0);
    let shapes: Vec<_> = slide.shapes().collect();
    assert_eq!(shapes.len(), 1);
    let (kind, frame, style) = shapes[0];
    assert_eq!(kind, ShapeKind::Ellipse);
    assert_eq!(*frame, Frame::new(1.0, 1.0, 0.5, 0.5));
    assert_eq!(style.fill.as_ref().unwrap().color, "00A8E8");
    assert!(style.line.is_none());
}

#[test]
fn test_parent_renders_before_child() {
    let mut catalog = IconCatalog::new();
    catalog
        .add_family_json(
            "test",
            r#"{"Nested": "function Nested (props) {\n  return GenIcon({\"tag\":\"svg\",\"attr\":{\"viewBox\":\"0 0 24 24\"},\"child\":[{\"tag\":\"path\",\"attr\":{\"d\":\"M0 0h24v24H0z\"},\"child\":[{\"tag\":\"circle\",\"attr\":{\"cx\":\"12\",\"cy\":\"12\",\"r\":\"4\"},\"child\":[]}]}]})(props);\n};"}"#,
        )
        .unwrap();

    let markup = serialize(&catalog.extract("test", "Nested").unwrap(), "#111111");
    let path_at = markup.find("<path").unwrap();
    let circle_at = markup.find("<circle").unwrap();
    assert!(path_at < circle_at);
}

#[test]
fn test_placement_is_independent_across_threads() {
    let icons = IconCatalog::builtin().unwrap();
    let names = ["HiCheck", "HiX", "HiChartBar", "HiLightningBolt"];

    let results: Vec<(bool, usize)> = thread::scope(|scope| {
        let handles: Vec<_> = names
            .iter()
            .map(|name| {
                let icons = &icons;
                scope.spawn(move || {
                    let mut slide = Slide::new();
                    let placement = place_icon(&mut slide, icons, "hi", name, 0.0, 0.0, 1.0, "FFFFFF");
                    (placement.is_image(), slide.elements.len())
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert_eq!(results, vec![(true, 1), (true, 1), (true, 1), (false, 1)]);
}

#[test]
fn test_icon_directory_overrides_bundled_family() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("hi.json"),
        r#"{"HiLightningBolt": {"tag": "svg", "attr": {"viewBox": "0 0 20 20"}, "child": [{"tag": "polygon", "attr": {"points": "11 2 3 12 10 12 9 18 17 8 10 8"}, "child": []}]}}"#,
    )
    .unwrap();

    let icons = IconCatalog::with_overrides(Some(dir.path())).unwrap();
    let mut slide = Slide::new();

    assert!(place_icon(&mut slide, &icons, "hi", "HiLightningBolt", 1.0, 1.0, 0.5, "00A8E8").is_image());
    // The override replaces the whole family
    assert!(icons.extract("hi", "HiCheck").is_err());
    assert!(icons.extract("fi", "FiTarget").is_ok());
}

#[test]
fn test_deck_renders_every_template_to_pptx() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("deck.json");
    let output = dir.path().join("deck.pptx");
    fs::write(
        &input,
        r#"{
            "title": "All Templates",
            "theme": "corporate",
            "slides": [
                {"type": "title", "title": "Kickoff", "formula": "Impact = Reach x Depth", "icon": {"name": "HiLightBulb"}},
                {"type": "section", "badge": "PART 1", "title": "Context"},
                {"type": "bullets", "items": [{"text": "One"}, {"text": "Two", "bold": true}]},
                {"type": "metric-grid", "metrics": [{"value": "42%", "desc": "Growth"}]},
                {"type": "comparison", "before": {"items": [{"text": "Manual", "icon": "HiX"}]}, "after": {"items": [{"text": "Automated", "icon": "HiCheck"}]}, "summary": "3x faster"},
                {"type": "chart", "title": "Trend", "chartData": [{"name": "Users", "labels": ["Jan", "Feb"], "values": [3, 5]}], "tableData": {"rows": [["Month", "Users"], ["Feb", "5"]]}},
                {"type": "table", "rows": [["A", "B"], ["1", "2"]]},
                {"type": "actions", "actions": [{"title": "Ship", "desc": "Next week", "icon": "HiLightningBolt"}]},
                {"type": "quadrant", "items": [{"title": "Q1", "icon": "FiTarget", "iconModule": "fi"}]},
                {"type": "cards", "cols": 2, "items": [{"title": "Card", "desc": "Text"}]},
                {"type": "flow", "nodes": [{"label": "Plan"}, {"label": "Do"}], "caption": "Loop"}
            ]
        }"#,
    )
    .unwrap();

    let count = generate_deck(&input, &output, &Config::new()).unwrap();

    assert_eq!(count, 11);
    let bytes = fs::read(&output).unwrap();
    assert_eq!(&bytes[..2], b"PK");

    let mut archive = zip::ZipArchive::new(std::io::Cursor::new(bytes)).unwrap();
    assert!(archive.by_name("ppt/charts/chart1.xml").is_ok());
}
