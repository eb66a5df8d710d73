//! The built-in product list used when no catalog file is
//! configured.
use super::models::{Category, Product};

fn product(id: &str, name: &str, category: Category, price: u64, description: &str) -> Product {
    Product {
        id: id.to_string(),
        name: name.to_string(),
        category,
        description: description.to_string(),
        price,
        unit: "1kg".to_string(),
        image: format!("/images/products/{}.jpg", id),
    }
}

pub fn products() -> Vec<Product> {
    vec![
        product(
            "nv1",
            "Boneless Chicken Pickle",
            Category::NonVegPickles,
            1200,
            "Tender boneless chicken slow cooked in cold pressed gingelly oil with Guntur chillies.",
        ),
        product(
            "nv2",
            "Mutton Pickle",
            Category::NonVegPickles,
            1800,
            "Machilipatnam style mutton pickle with freshly ground spices and garlic.",
        ),
        product(
            "v1",
            "Avakaya Mango Pickle",
            Category::VegPickles,
            500,
            "The classic Andhra cut mango pickle with mustard, chilli and gingelly oil.",
        ),
        product(
            "nv3",
            "Prawn Pickle",
            Category::NonVegPickles,
            1600,
            "Coastal prawns fried crisp and tossed in a tangy tamarind masala.",
        ),
        product(
            "v2",
            "Gongura Pickle",
            Category::VegPickles,
            450,
            "Sour sorrel leaves ground with roasted red chillies. A true Andhra staple.",
        ),
        product(
            "v3",
            "Tomato Pickle",
            Category::VegPickles,
            400,
            "Sun ripened tomatoes cooked down with tamarind and hing.",
        ),
        product(
            "s1",
            "Bellam Gavvalu",
            Category::Sweets,
            600,
            "Crunchy shell shaped sweets coated in jaggery syrup.",
        ),
        product(
            "s2",
            "Putharekulu",
            Category::Sweets,
            900,
            "Paper thin rice starch sheets layered with ghee and powdered jaggery.",
        ),
        product(
            "d1",
            "Dry Fish (Endu Chepalu)",
            Category::NvDryItems,
            1100,
            "Sun dried coastal fish, cleaned and ready to fry.",
        ),
        product(
            "d2",
            "Dry Prawns",
            Category::NvDryItems,
            1400,
            "Small sun dried prawns for chutneys and curries.",
        ),
        product(
            "h1",
            "Karam Podi",
            Category::HotItems,
            550,
            "Fiery spice powder with roasted lentils and garlic, best with hot rice and ghee.",
        ),
        product(
            "h2",
            "Chekkalu",
            Category::HotItems,
            480,
            "Crisp rice crackers with chana dal, curry leaves and green chilli.",
        ),
    ]
}
