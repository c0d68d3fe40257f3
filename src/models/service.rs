use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub price: f64,
    pub image_id: &'static str,
}

static CATALOG: [Service; 4] = [
    Service {
        id: "bridal-makeup",
        name: "Bridal Makeup",
        description: "A complete bridal package for your special day, ensuring you look flawless from ceremony to reception.",
        price: 350.0,
        image_id: "bridal-makeup",
    },
    Service {
        id: "semi-bridal-makeup",
        name: "Semi-Bridal Makeup",
        description: "Perfect for engagement parties, receptions, or other pre-wedding events. A glamorous yet elegant look.",
        price: 200.0,
        image_id: "semi-bridal-makeup",
    },
    Service {
        id: "party-makeup",
        name: "Party Makeup",
        description: "Get ready for any special occasion with our party makeup service. Look your best for birthdays, anniversaries, or a night out.",
        price: 150.0,
        image_id: "party-makeup",
    },
    Service {
        id: "makeup-classes",
        name: "Makeup Classes",
        description: "Learn from the best. Our one-on-one or group classes cover everything from basics to advanced techniques.",
        price: 100.0,
        image_id: "makeup-classes",
    },
];

pub fn catalog() -> &'static [Service] {
    &CATALOG
}

pub fn find_service(id: &str) -> Option<&'static Service> {
    CATALOG.iter().find(|s| s.id == id)
}
