use std::sync::Arc;

use dao::shop::{ShopEntity, ShopSummaryEntity, TreatmentEntity};
use service::{
    booking::{BookingRecord, BookingSubmission},
    session::Identity,
};
use time::macros::{date, time};

pub fn default_identity() -> Identity {
    Identity {
        user_id: "U1".into(),
        name: "Kim".into(),
        phone: Some("010-0000-0000".into()),
    }
}

pub fn default_shop_summaries() -> Arc<[ShopSummaryEntity]> {
    Arc::new([
        ShopSummaryEntity {
            id: "S1".into(),
            name: "Glow Nails".into(),
            address: Some("Seoul".into()),
        },
        ShopSummaryEntity {
            id: "S2".into(),
            name: "Lash Bar".into(),
            address: None,
        },
    ])
}

pub fn default_shop_entity() -> ShopEntity {
    ShopEntity {
        id: "S1".into(),
        name: "Glow Nails".into(),
        partner_id: "P1".into(),
        treatments: Arc::new([
            TreatmentEntity {
                id: "SV1".into(),
                name: "Gel nails".into(),
                price: 50000,
                duration_minutes: Some(60),
            },
            TreatmentEntity {
                id: "SV2".into(),
                name: "Lash lift".into(),
                price: 45000,
                duration_minutes: None,
            },
        ]),
    }
}

pub fn default_submission() -> BookingSubmission {
    BookingSubmission {
        shop_id: "S1".into(),
        shop_name: "Glow Nails".into(),
        partner_id: "P1".into(),
        service_id: "SV1".into(),
        service_name: "Gel nails".into(),
        price: 50000,
        date: date!(2025 - 03 - 10),
        time: time!(14:00),
        customer_name: "Kim".into(),
        customer_phone: "010-0000-0000".into(),
    }
}

pub fn default_record() -> BookingRecord {
    BookingRecord {
        id: "B1".into(),
        submission: default_submission(),
    }
}
