// Golden and property checks for the generated signature HTML
use signature_studio::signature::{display_url, generate, initials, phone_href, SignatureRecord};

const SEED_GOLDEN: &str = include_str!("fixtures/seed_signature.html");
const FULL_GOLDEN: &str = include_str!("fixtures/full_signature.html");
const EMPTY_GOLDEN: &str = include_str!("fixtures/empty_signature.html");

fn full_record() -> SignatureRecord {
    SignatureRecord {
        name: "Ada".to_string(),
        surname: "Lovelace".to_string(),
        title: "Analyst".to_string(),
        phone: "+44 20 7946 0958".to_string(),
        email: "ada@example.com".to_string(),
        website1: "https://example.com/".to_string(),
        website2: "HTTP://Engine.example.org".to_string(),
        address1: "12 St James's Square".to_string(),
        address2: "London".to_string(),
        photo_url: "data:image/jpeg;base64,AAAA".to_string(),
        logo_url: "https://example.com/logo.png".to_string(),
    }
}

#[test]
fn seed_record_matches_golden() {
    assert_eq!(generate(&SignatureRecord::seed()), SEED_GOLDEN);
}

#[test]
fn full_record_matches_golden() {
    assert_eq!(generate(&full_record()), FULL_GOLDEN);
}

#[test]
fn empty_record_matches_golden() {
    assert_eq!(generate(&SignatureRecord::default()), EMPTY_GOLDEN);
}

#[test]
fn same_record_renders_identically() {
    let record = full_record();
    assert_eq!(generate(&record), generate(&record.clone()));
}

#[test]
fn seed_renders_placeholder_without_optional_blocks() {
    let html = generate(&SignatureRecord::seed());

    assert!(html.contains(">GE</div>") || html.contains("GE\n"));
    assert!(!html.contains("alt=\"CREMICRO\""));
    assert_eq!(html.matches("🌐").count(), 1);
    assert_eq!(html.matches("📍").count(), 1);
}

#[test]
fn photo_replaces_initials() {
    let html = generate(&full_record());
    assert!(html.contains(r#"<img src="data:image/jpeg;base64,AAAA""#));
    assert!(!html.contains("linear-gradient"));
}

#[test]
fn empty_record_has_no_contact_icons() {
    let html = generate(&SignatureRecord::default());
    for icon in ["📞", "✉️", "🌐", "📍", "<img"] {
        assert!(!html.contains(icon), "unexpected {icon} in empty signature");
    }
}

#[test]
fn derived_values_follow_the_form_rules() {
    assert_eq!(initials("Ada", "Lovelace"), "AL");
    assert_eq!(initials("", "Lovelace"), "L");
    assert_eq!(display_url("https://cremicro.com/"), "cremicro.com");
    assert_eq!(display_url("http://example.com"), "example.com");
    assert_eq!(display_url("ftp://x.com"), "ftp://x.com");
    assert_eq!(phone_href("+90 531 855 63 71"), "+905318556371");
}

#[test]
fn phone_link_keeps_visible_spacing() {
    let html = generate(&full_record());
    assert!(html.contains(r#"href="tel:+442079460958""#));
    assert!(html.contains(">+44 20 7946 0958</a>"));
}

#[test]
fn record_json_feeds_the_generator() {
    let record = SignatureRecord::from_json_str(
        r#"{"name":"Ada","surname":"Lovelace","phone":null,"website1":42}"#,
    )
    .expect("record should parse");

    let html = generate(&record);
    assert!(!html.contains("tel:"));
    assert!(html.contains(">42</a>"));
}
