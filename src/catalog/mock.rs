use crate::domain::{Product, ServiceType, Store};

pub const DEFAULT_STORE_DELIVERY_FEE: f64 = 5.0;

fn store(
    id: &str,
    name: &str,
    service_type: ServiceType,
    rating: f64,
    distance: &str,
    image: u32,
    products: Vec<Product>,
) -> Store {
    Store {
        id: id.to_string(),
        name: name.to_string(),
        service_type,
        rating,
        distance: distance.to_string(),
        image: format!("https://picsum.photos/200/200?random={image}"),
        delivery_fee: DEFAULT_STORE_DELIVERY_FEE,
        products,
    }
}

fn product(id: &str, name: &str, price: f64, image: u32) -> Product {
    Product::new(id, name, price, format!("https://picsum.photos/100/100?random={image}"))
}

pub(super) fn stores() -> Vec<Store> {
    vec![
        store(
            "s1",
            "Crispy Chicken (Tech Park)",
            ServiceType::Dining,
            4.8,
            "1.2km",
            1,
            vec![
                product("p1", "Spicy Chicken Burger", 19.5, 11),
                product("p2", "Original Fried Chicken", 12.0, 12),
                product("p3", "Large Fries", 11.0, 13),
            ],
        ),
        store(
            "s2",
            "Pizza Corner (City Mall)",
            ServiceType::Dining,
            4.6,
            "3.5km",
            2,
            vec![
                product("p4", "Supreme Pizza", 69.0, 14),
                product("p5", "Bolognese Pasta", 29.0, 15),
            ],
        ),
        store(
            "s3",
            "Fresh Mart Supermarket",
            ServiceType::Market,
            4.7,
            "2.0km",
            3,
            vec![
                product("p6", "Cola 6-pack", 18.0, 16),
                product("p7", "Potato Chips", 8.5, 17),
                product("p8", "Kiwi Fruit", 25.0, 18),
            ],
        ),
    ]
}
