use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct Product {
    name: String,
    manufacturer: String,
    price: i32,
}

impl Product {
    #[allow(dead_code)]
    pub fn new() -> Product {
        Product { name: "Moto <G>".to_owned(), manufacturer: "Motorola".to_owned(), price: 100 }
    }
}

#[derive(Debug, Serialize)]
pub struct Review {
    title: String,
    paragraphs: Vec<String>,
}

impl Review {
    #[allow(dead_code)]
    pub fn new(title: &str, paragraphs: &[&str]) -> Review {
        Review {
            title: title.to_owned(),
            paragraphs: paragraphs.iter().map(|p| p.to_string()).collect(),
        }
    }
}
