use bento_import::classify;

pub fn cmd_classify(url: &str, section: &str) {
    let classification = classify(url, &section.trim().to_lowercase());
    println!("🔗 {url}");
    println!("   Type: {}", classification.block_type);
    println!("   Title: {}", classification.title);
}
