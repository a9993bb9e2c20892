use std::sync::Arc;

#[cfg(feature = "dao-impl")]
use dao::{
    booking::{BookingEntity, NewBookingEntity},
    payment::{CheckoutSessionEntity, PaymentEntity, PaymentMethodEntity},
    shop::{ShopEntity, ShopSummaryEntity, TreatmentEntity},
};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ShopSummaryTO {
    pub id: Arc<str>,
    pub name: Arc<str>,
    #[serde(default)]
    pub address: Option<Arc<str>>,
}
#[cfg(feature = "dao-impl")]
impl From<&ShopSummaryTO> for ShopSummaryEntity {
    fn from(shop: &ShopSummaryTO) -> Self {
        Self {
            id: shop.id.clone(),
            name: shop.name.clone(),
            address: shop.address.clone(),
        }
    }
}

/// A service offered by a shop, as listed on the shop detail.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TreatmentTO {
    pub id: Arc<str>,
    pub name: Arc<str>,
    pub price: u64,
    #[serde(default)]
    pub duration_minutes: Option<u32>,
}
#[cfg(feature = "dao-impl")]
impl From<&TreatmentTO> for TreatmentEntity {
    fn from(treatment: &TreatmentTO) -> Self {
        Self {
            id: treatment.id.clone(),
            name: treatment.name.clone(),
            price: treatment.price,
            duration_minutes: treatment.duration_minutes,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ShopTO {
    pub id: Arc<str>,
    pub name: Arc<str>,
    pub partner_id: Arc<str>,
    #[serde(default)]
    pub services: Vec<TreatmentTO>,
}
#[cfg(feature = "dao-impl")]
impl From<&ShopTO> for ShopEntity {
    fn from(shop: &ShopTO) -> Self {
        Self {
            id: shop.id.clone(),
            name: shop.name.clone(),
            partner_id: shop.partner_id.clone(),
            treatments: shop.services.iter().map(TreatmentEntity::from).collect(),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingRequestTO {
    pub user_id: Arc<str>,
    pub user_name: Arc<str>,
    pub user_phone: Arc<str>,
    pub shop_id: Arc<str>,
    pub shop_name: Arc<str>,
    pub partner_id: Arc<str>,
    pub service_id: Arc<str>,
    pub service_name: Arc<str>,
    pub date: Arc<str>,
    pub time: Arc<str>,
    pub price: u64,
}
#[cfg(feature = "dao-impl")]
impl TryFrom<&NewBookingEntity> for CreateBookingRequestTO {
    type Error = salon_utils::date_utils::SalonDateUtilsError;

    fn try_from(booking: &NewBookingEntity) -> Result<Self, Self::Error> {
        Ok(Self {
            user_id: booking.user_id.clone(),
            user_name: booking.user_name.clone(),
            user_phone: booking.user_phone.clone(),
            shop_id: booking.shop_id.clone(),
            shop_name: booking.shop_name.clone(),
            partner_id: booking.partner_id.clone(),
            service_id: booking.service_id.clone(),
            service_name: booking.service_name.clone(),
            date: salon_utils::date_utils::format_date(booking.date)?.into(),
            time: salon_utils::date_utils::format_time(booking.time)?.into(),
            price: booking.price,
        })
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BookingTO {
    pub id: Arc<str>,
    #[serde(default)]
    pub status: Option<Arc<str>>,
}
#[cfg(feature = "dao-impl")]
impl From<&BookingTO> for BookingEntity {
    fn from(booking: &BookingTO) -> Self {
        Self {
            id: booking.id.clone(),
            status: booking.status.clone(),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingResponseTO {
    pub success: bool,
    #[serde(default)]
    pub booking: Option<BookingTO>,
    #[serde(default)]
    pub message: Option<Arc<str>>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutSessionRequestTO {
    pub booking_id: Arc<str>,
    pub user_id: Arc<str>,
    pub currency: Arc<str>,
}
#[cfg(feature = "dao-impl")]
impl From<&CheckoutSessionEntity> for CheckoutSessionRequestTO {
    fn from(session: &CheckoutSessionEntity) -> Self {
        Self {
            booking_id: session.booking_id.clone(),
            user_id: session.user_id.clone(),
            currency: session.currency.clone(),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutSessionResponseTO {
    pub success: bool,
    #[serde(default)]
    pub url: Option<Arc<str>>,
    #[serde(default)]
    pub message: Option<Arc<str>>,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum PaymentMethodTO {
    BankTransfer,
    MobileEasyPay,
}
#[cfg(feature = "dao-impl")]
impl From<PaymentMethodEntity> for PaymentMethodTO {
    fn from(method: PaymentMethodEntity) -> Self {
        match method {
            PaymentMethodEntity::BankTransfer => Self::BankTransfer,
            PaymentMethodEntity::MobileEasyPay => Self::MobileEasyPay,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRequestTO {
    pub booking_id: Arc<str>,
    pub user_id: Arc<str>,
    pub amount: u64,
    pub method: PaymentMethodTO,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_method_detail: Option<Arc<str>>,
}
#[cfg(feature = "dao-impl")]
impl From<&PaymentEntity> for PaymentRequestTO {
    fn from(payment: &PaymentEntity) -> Self {
        Self {
            booking_id: payment.booking_id.clone(),
            user_id: payment.user_id.clone(),
            amount: payment.amount,
            method: payment.method.into(),
            payment_method_detail: payment.method_detail.clone(),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PaymentResponseTO {
    pub success: bool,
    #[serde(default)]
    pub message: Option<Arc<str>>,
}
