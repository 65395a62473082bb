//! End-to-end rendering scenarios over the public `render` entry point.

use mailcomb_engine::{RenderOpts, render};

fn compile(source: &str) -> String {
    render(source, RenderOpts::default()).unwrap()
}

fn compile_with_test_ids(source: &str) -> String {
    render(
        source,
        RenderOpts {
            test_ids: true,
            ..Default::default()
        },
    )
    .unwrap()
}

fn count(haystack: &str, needle: &str) -> usize {
    haystack.matches(needle).count()
}

const S1: &str = "<mjml><mj-head><mj-preview>Hello</mj-preview></mj-head><mj-body><mj-section><mj-column><mj-text>Hi</mj-text></mj-column></mj-section></mj-body></mjml>";

#[test]
fn s1_minimal_document_shape() {
    let html = compile(S1);
    assert_eq!(
        count(
            &html,
            "<div style=\"display:none;font-size:1px;color:#ffffff;line-height:1px;max-height:0px;max-width:0px;opacity:0;overflow:hidden;\">Hello</div>"
        ),
        1,
        "got: {html}"
    );
    // One outer div from the body.
    assert_eq!(count(&html, "<body style=\"word-spacing:normal;\">\n"), 1);
    assert_eq!(
        count(&html, r#"width="600" style="width:600px;""#),
        1,
        "got: {html}"
    );
    assert_eq!(
        count(&html, r#"class="mj-column-per-100 mj-outlook-group-fix""#),
        1,
        "got: {html}"
    );
    assert_eq!(
        count(
            &html,
            r#"<td align="left" style="font-size:0px;padding:10px 25px;word-break:break-word;">"#
        ),
        1,
        "got: {html}"
    );
}

#[test]
fn s2_three_equal_columns() {
    let html = compile(
        "<mjml><mj-body><mj-section>\
         <mj-column><mj-text>a</mj-text></mj-column>\
         <mj-column><mj-text>b</mj-text></mj-column>\
         <mj-column><mj-text>c</mj-text></mj-column>\
         </mj-section></mj-body></mjml>",
    );
    assert_eq!(
        count(&html, r#"class="mj-column-per-33-333332 mj-outlook-group-fix""#),
        3,
        "got: {html}"
    );
    assert_eq!(
        count(&html, "width:200px;"),
        3,
        "each MSO cell is 600/3 px: {html}"
    );
}

#[test]
fn s3_button_anchor_width() {
    let with_width = compile(
        r#"<mjml><mj-body><mj-section><mj-column><mj-button href="https://x" width="200px">Go</mj-button></mj-column></mj-section></mj-body></mjml>"#,
    );
    let anchor = with_width.split("<a ").nth(1).unwrap();
    assert!(anchor.contains("width:150px;"), "200 − 2×25: {anchor}");

    let without_width = compile(
        r#"<mjml><mj-body><mj-section><mj-column><mj-button href="https://x">Go</mj-button></mj-column></mj-section></mj-body></mjml>"#,
    );
    let anchor = without_width.split("<a ").nth(1).unwrap();
    let anchor_tag = anchor.split('>').next().unwrap();
    assert!(
        !anchor_tag.contains("width:"),
        "no declared width, no width style: {anchor_tag}"
    );
}

#[test]
fn s4_image_width_inside_600px_column() {
    let html = compile(
        r#"<mjml><mj-body><mj-section><mj-column><mj-image src="https://x/y.png"/></mj-column></mj-section></mj-body></mjml>"#,
    );
    assert!(html.contains(r#"width="550""#), "got: {html}");
    assert!(html.contains("width:100%;"), "got: {html}");
}

#[test]
fn s5_full_width_background_vml() {
    let html = compile(
        r#"<mjml><mj-body><mj-section full-width="full-width" background-url="https://x/bg.png" background-repeat="no-repeat" background-size="cover"><mj-column/></mj-section></mj-body></mjml>"#,
    );
    for needle in [
        r#"type="frame""#,
        r#"size="1,1""#,
        r#"aspect="atleast""#,
        r#"position="0, 0""#,
        r#"origin="0, 0""#,
    ] {
        assert!(html.contains(needle), "missing {needle} in: {html}");
    }
}

const CAROUSEL_DOC: &str = r#"<mjml><mj-body><mj-section><mj-column><mj-carousel><mj-carousel-image src="https://x/1.png"/><mj-carousel-image src="https://x/2.png"/></mj-carousel></mj-column></mj-section></mj-body></mjml>"#;

#[test]
fn s6_test_mode_differs_only_in_ids() {
    let test_mode = compile_with_test_ids(CAROUSEL_DOC);
    assert!(
        test_mode.contains("mj-carousel-f01ab44896143632-radio-1"),
        "first test-mode carousel id is the seed: {test_mode}"
    );

    let production = compile(CAROUSEL_DOC);
    let id = extract_carousel_id(&production);
    let normalized_production = production.replace(&id, "CID");
    let normalized_test = test_mode.replace("f01ab44896143632", "CID");
    assert_eq!(normalized_production, normalized_test);
}

fn extract_carousel_id(html: &str) -> String {
    let marker = "name=\"mj-carousel-radio-";
    let start = html.find(marker).expect("carousel radio name") + marker.len();
    html[start..start + 16].to_string()
}

#[test]
fn carousel_id_sequence_follows_the_lcg() {
    let two = format!(
        r#"<mjml><mj-body><mj-section><mj-column>{c}{c}</mj-column></mj-section></mj-body></mjml>"#,
        c = r#"<mj-carousel><mj-carousel-image src="https://x/1.png"/></mj-carousel>"#
    );
    let html = compile_with_test_ids(&two);
    let first: u64 = 0xf01a_b448_9614_3632;
    let second = first
        .wrapping_mul(6364136223846793005)
        .wrapping_add(1442695040888963407);
    assert!(html.contains(&format!("mj-carousel-radio-{first:016x}")), "got: {html}");
    assert!(html.contains(&format!("mj-carousel-radio-{second:016x}")), "got: {html}");
}

#[test]
fn navbar_ids_count_up_from_zero() {
    let html = compile_with_test_ids(
        r#"<mjml><mj-body><mj-section><mj-column>
           <mj-navbar hamburger="hamburger"><mj-navbar-link href="/a">A</mj-navbar-link></mj-navbar>
           <mj-navbar hamburger="hamburger"><mj-navbar-link href="/b">B</mj-navbar-link></mj-navbar>
           </mj-column></mj-section></mj-body></mjml>"#,
    );
    assert!(html.contains(r#"id="00000000""#), "got: {html}");
    assert!(html.contains(r#"id="00000001""#), "got: {html}");
}

#[test]
fn column_width_classes_for_sibling_counts_one_to_ten() {
    for n in 1usize..=10 {
        let columns = "<mj-column><mj-text>x</mj-text></mj-column>".repeat(n);
        let source =
            format!("<mjml><mj-body><mj-section>{columns}</mj-section></mj-body></mjml>");
        let html = compile(&source);
        let pct = 100.0_f32 / n as f32;
        let expected = format!("mj-column-per-{}", format!("{pct}").replace('.', "-"));
        assert_eq!(
            count(&html, &format!("class=\"{expected} mj-outlook-group-fix\"")),
            n,
            "sibling count {n}: {html}"
        );
    }
}

#[test]
fn attribute_precedence_through_mj_attributes() {
    let html = compile(
        r##"<mjml><mj-head><mj-attributes>
             <mj-all color="#0b0b0b"/>
             <mj-text color="#444444" font-size="15px"/>
             <mj-class name="shout" text-transform="uppercase"/>
           </mj-attributes></mj-head>
           <mj-body><mj-section><mj-column>
             <mj-text mj-class="shout" color="#111111">one</mj-text>
             <mj-text>two</mj-text>
           </mj-column></mj-section></mj-body></mjml>"##,
    );
    // Element beats class and globals.
    assert!(html.contains("color:#111111;"), "got: {html}");
    // Class bundle applies where the element is silent.
    assert!(html.contains("text-transform:uppercase;"), "got: {html}");
    // Per-tag beats blanket global.
    assert!(html.contains("color:#444444;"), "got: {html}");
    assert!(!html.contains("color:#0b0b0b;"), "got: {html}");
    assert!(html.contains("font-size:15px;"), "got: {html}");
}

#[test]
fn fonts_used_in_output_drive_head_imports() {
    let html = compile(S1);
    // Default text font family is Ubuntu-based, a known Google font.
    assert!(
        html.contains("https://fonts.googleapis.com/css?family=Ubuntu:300,400,500,700"),
        "got: {html}"
    );
    assert!(html.contains("@import url(https://fonts.googleapis.com/css?family=Ubuntu"));

    let no_font = compile(
        r#"<mjml><mj-body><mj-section><mj-column><mj-text font-family="Courier New">x</mj-text></mj-column></mj-section></mj-body></mjml>"#,
    );
    assert!(
        !no_font.contains("fonts.googleapis.com"),
        "Courier New is not importable: {no_font}"
    );
}

#[test]
fn custom_fonts_only_import_when_used() {
    let used = compile(
        r#"<mjml><mj-head><mj-font name="Raleway" href="https://fonts.example/raleway"/></mj-head><mj-body><mj-section><mj-column><mj-text font-family="Raleway, Arial">x</mj-text></mj-column></mj-section></mj-body></mjml>"#,
    );
    assert!(used.contains("https://fonts.example/raleway"), "got: {used}");

    let unused = compile(
        r#"<mjml><mj-head><mj-font name="Raleway" href="https://fonts.example/raleway"/></mj-head><mj-body><mj-section><mj-column><mj-text>x</mj-text></mj-column></mj-section></mj-body></mjml>"#,
    );
    assert!(!unused.contains("fonts.example"), "got: {unused}");
}

#[test]
fn mj_style_blocks_reach_the_head() {
    let html = compile(
        r#"<mjml><mj-head><mj-style>.shadow { box-shadow: 0 0 3px; }</mj-style></mj-head><mj-body><mj-section><mj-column><mj-text>x</mj-text></mj-column></mj-section></mj-body></mjml>"#,
    );
    assert!(html.contains(".shadow { box-shadow: 0 0 3px; }"), "got: {html}");
}

#[test]
fn inline_styles_apply_to_matching_classes_instead_of_the_head() {
    let html = compile(
        r#"<mjml><mj-head><mj-style inline="inline">.tinted { color: #123123; }</mj-style></mj-head><mj-body><mj-section><mj-column css-class="tinted"><mj-text>x</mj-text></mj-column></mj-section></mj-body></mjml>"#,
    );
    let head_end = html.find("</head>").unwrap();
    assert!(
        !html[..head_end].contains("#123123"),
        "inline rules must not render in head: {html}"
    );
    assert!(
        html[head_end..].contains("color:#123123;"),
        "inline rule applies to the column div: {html}"
    );
}

const KITCHEN_SINK: &str = r##"<mjml><mj-head>
  <mj-title>Sink</mj-title>
  <mj-preview>peek</mj-preview>
</mj-head><mj-body>
  <mj-wrapper border="4px solid #000000">
    <mj-section><mj-column><mj-text>first</mj-text></mj-column></mj-section>
    <mj-raw><p>interlude</p></mj-raw>
    <mj-section background-url="https://x/bg.png" background-repeat="no-repeat">
      <mj-column width="200px"><mj-image src="https://x/a.png"/></mj-column>
      <mj-column><mj-button href="https://x">Go</mj-button></mj-column>
    </mj-section>
  </mj-wrapper>
  <mj-section>
    <mj-group>
      <mj-column><mj-text>left</mj-text></mj-column>
      <mj-column><mj-divider/></mj-column>
    </mj-group>
  </mj-section>
  <mj-section><mj-column>
    <mj-social><mj-social-element name="twitter" href="#"/></mj-social>
    <mj-navbar hamburger="hamburger"><mj-navbar-link href="/x">X</mj-navbar-link></mj-navbar>
    <mj-carousel><mj-carousel-image src="https://x/1.png"/><mj-carousel-image src="https://x/2.png"/></mj-carousel>
    <mj-spacer height="30px"/>
  </mj-column></mj-section>
</mj-body></mjml>"##;

#[test]
fn mso_conditionals_balance_in_a_full_document() {
    let html = compile_with_test_ids(KITCHEN_SINK);
    assert_eq!(
        count(&html, "<!--[if mso | IE]>"),
        count(&html, "<![endif]-->")
            - count(&html, "<!--[if !mso]><!-->")
            - count(&html, "<!--[if mso]>")
            - count(&html, "<!--[if lte mso 11]>"),
        "unbalanced MSO comments"
    );
    // Downlevel-revealed comments balance separately.
    assert_eq!(
        count(&html, "<!--[if !mso]><!-->"),
        count(&html, "<!--<![endif]-->")
    );
}

#[test]
fn full_document_is_deterministic() {
    let first = compile_with_test_ids(KITCHEN_SINK);
    let second = compile_with_test_ids(KITCHEN_SINK);
    assert_eq!(first, second);
}

#[test]
fn invalid_attributes_surface_next_to_successful_output() {
    use std::sync::{Arc, Mutex};
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    let opts = RenderOpts {
        invalid_attribute_reporter: Some(Arc::new(move |report| {
            sink.lock().unwrap().push(report);
        })),
        ..Default::default()
    };
    let html = render(
        r#"<mjml><mj-body><mj-section typo="oops"><mj-column><mj-text>x</mj-text></mj-column></mj-section></mj-body></mjml>"#,
        opts,
    )
    .unwrap();
    assert!(html.contains("</html>"), "render still succeeds");
    let reports = seen.lock().unwrap();
    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0].tag, "mj-section");
    assert_eq!(reports[0].attribute, "typo");
}

#[test]
fn preview_fragment_snapshot() {
    insta::assert_snapshot!(
        mailcomb_engine::head::preview_div("Hello"),
        @r#"<div style="display:none;font-size:1px;color:#ffffff;line-height:1px;max-height:0px;max-width:0px;opacity:0;overflow:hidden;">Hello</div>"#
    );
}

#[test]
fn divider_fragment_snapshot() {
    let html = compile(
        "<mjml><mj-body><mj-section><mj-column><mj-divider/></mj-column></mj-section></mj-body></mjml>",
    );
    let start = html.find("<p ").unwrap();
    let end = html[start..].find("</table><![endif]-->").unwrap() + start + "</table><![endif]-->".len();
    insta::assert_snapshot!(
        &html[start..end],
        @r#"<p style="border-top:solid 4px #000000;font-size:1px;margin:0px auto;width:100%;"></p><!--[if mso | IE]><table align="center" border="0" cellpadding="0" cellspacing="0" role="presentation" width="550px" style="border-top:solid 4px #000000;font-size:1px;margin:0px auto;width:550px;"><tr><td style="height:0;line-height:0;">&nbsp;</td></tr></table><![endif]-->"#
    );
}
