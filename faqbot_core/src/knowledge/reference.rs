use super::{CategoryEntry, KnowledgeBase};

const GENERAL: [(&str, &str); 3] = [
    (
        "What are your store hours?",
        "Our store operates 24/7 online. Physical store hours are 9 AM to 9 PM, Monday to Saturday.",
    ),
    (
        "Do you have a return policy?",
        "Yes, we have a 30-day return policy. Please ensure the product is unused and in its original packaging.",
    ),
    (
        "How can I contact customer service?",
        "You can contact our customer service at support@example.com or call 123-456-7890.",
    ),
];

const ORDERS: [(&str, &str); 3] = [
    (
        "Where is my order?",
        "To check your order status, log in to your account and go to 'My Orders'.",
    ),
    (
        "How do I track my shipment?",
        "You can track your shipment using the tracking ID sent to your email after dispatch.",
    ),
    (
        "Can I cancel my order?",
        "Yes, you can cancel your order before it is shipped. Go to 'My Orders' and click 'Cancel Order'.",
    ),
];

const PRODUCTS: [(&str, &str); 3] = [
    (
        "Do you have discounts on electronics?",
        "Yes, we currently have discounts on selected electronics. Visit our 'Deals' section for more details.",
    ),
    (
        "What is the warranty on your products?",
        "Most products come with a one-year manufacturer warranty. Please check the product page for specific details.",
    ),
    (
        "Do you offer international shipping?",
        "Yes, we offer international shipping to select countries. Shipping fees and times vary based on location.",
    ),
];

fn entry(pairs: &[(&str, &str)]) -> CategoryEntry {
    let (questions, answers): (Vec<String>, Vec<String>) = pairs
        .iter()
        .map(|(q, a)| ((*q).to_string(), (*a).to_string()))
        .unzip();
    CategoryEntry { questions, answers }
}

// Built directly: the tables above are equal-length pairs with distinct names.
pub(super) fn build() -> KnowledgeBase {
    KnowledgeBase {
        categories: vec![
            ("general".to_string(), entry(&GENERAL)),
            ("orders".to_string(), entry(&ORDERS)),
            ("products".to_string(), entry(&PRODUCTS)),
        ],
    }
}
