use serde::{Deserialize, Serialize};

/// Root configuration DTO, parsed from the booking config JSON file.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct BookingConfigDto {
    pub slot_granularity_minutes: i64,
    pub business_hours: BusinessHoursDto,
    #[serde(default)]
    pub pricing: PricingDto,
    pub resources: Vec<ResourceDto>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct BusinessHoursDto {
    pub weekday: HoursWindowDto,
    pub weekend: HoursWindowDto,
    #[serde(default)]
    pub holidays: Vec<HolidayDto>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy)]
#[serde(rename_all = "camelCase")]
pub struct HoursWindowDto {
    pub open: i64,
    pub close: i64,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy)]
#[serde(rename_all = "camelCase")]
pub struct HolidayDto {
    pub month: u32,
    pub day: u32,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default)]
#[serde(rename_all = "camelCase")]
pub struct PricingDto {
    pub group_discount: Option<GroupDiscountDto>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy)]
#[serde(rename_all = "camelCase")]
pub struct GroupDiscountDto {
    pub min_participants: u32,
    pub percent: f64,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ResourceDto {
    pub id: String,
    pub category: ResourceCategoryDto,
    pub base_price: f64,
    #[serde(default)]
    pub features: Vec<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum ResourceCategoryDto {
    Standard,
    Vip,
}
