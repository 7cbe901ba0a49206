//! Food catalog used for recommendations
//!
//! The built-in catalog lists Indonesian dishes, five per mood, with macro
//! values per serving.

use crate::models::Mood;
use once_cell::sync::Lazy;

/// A catalog food and the mood it supports
#[derive(Debug, Clone, PartialEq)]
pub struct FoodItem {
    pub name: String,
    pub calories: f64,
    pub proteins: f64,
    pub fats: f64,
    pub carbohydrates: f64,
    pub mood: Mood,
}

impl FoodItem {
    pub fn new(
        name: impl Into<String>,
        calories: f64,
        proteins: f64,
        fats: f64,
        carbohydrates: f64,
        mood: Mood,
    ) -> Self {
        Self {
            name: name.into(),
            calories: calories.max(0.0),
            proteins: proteins.max(0.0),
            fats: fats.max(0.0),
            carbohydrates: carbohydrates.max(0.0),
            mood,
        }
    }
}

/// Ordered list of foods; order breaks similarity ties
#[derive(Debug, Clone, Default)]
pub struct FoodCatalog {
    items: Vec<FoodItem>,
}

impl FoodCatalog {
    pub fn new(items: Vec<FoodItem>) -> Self {
        Self { items }
    }

    pub fn items(&self) -> &[FoodItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Foods supporting the given mood, in catalog order
    pub fn for_mood(&self, mood: Mood) -> impl Iterator<Item = &FoodItem> {
        self.items.iter().filter(move |item| item.mood == mood)
    }

    /// Shared instance of the built-in catalog
    pub fn builtin() -> &'static FoodCatalog {
        &BUILTIN_CATALOG
    }
}

static BUILTIN_CATALOG: Lazy<FoodCatalog> = Lazy::new(|| {
    use Mood::*;

    FoodCatalog::new(vec![
        FoodItem::new("Sate Ayam", 380.0, 30.0, 18.0, 22.0, Energizing),
        FoodItem::new("Rendang Sapi", 470.0, 32.0, 32.0, 10.0, Energizing),
        FoodItem::new("Nasi Goreng Telur", 520.0, 18.0, 20.0, 68.0, Energizing),
        FoodItem::new("Ayam Bakar Taliwang", 410.0, 36.0, 22.0, 12.0, Energizing),
        FoodItem::new("Soto Daging", 330.0, 24.0, 14.0, 26.0, Energizing),
        FoodItem::new("Bubur Kacang Hijau", 310.0, 10.0, 8.0, 50.0, Calming),
        FoodItem::new("Kolak Pisang", 290.0, 3.0, 9.0, 52.0, Calming),
        FoodItem::new("Martabak Manis", 600.0, 10.0, 28.0, 78.0, Calming),
        FoodItem::new("Pisang Goreng", 280.0, 3.0, 14.0, 38.0, Calming),
        FoodItem::new("Wedang Jahe dan Roti Bakar", 240.0, 6.0, 7.0, 38.0, Calming),
        FoodItem::new("Pepes Ikan", 230.0, 28.0, 10.0, 4.0, Focused),
        FoodItem::new("Tempe Bacem", 190.0, 16.0, 9.0, 12.0, Focused),
        FoodItem::new("Tahu Telur", 300.0, 20.0, 18.0, 12.0, Focused),
        FoodItem::new("Ikan Bakar", 250.0, 34.0, 10.0, 2.0, Focused),
        FoodItem::new("Telur Balado", 210.0, 13.0, 15.0, 5.0, Focused),
        FoodItem::new("Gado-Gado", 330.0, 14.0, 18.0, 30.0, Balanced),
        FoodItem::new("Nasi Goreng", 350.0, 12.0, 15.0, 45.0, Balanced),
        FoodItem::new("Pecel Sayur", 280.0, 11.0, 14.0, 28.0, Balanced),
        FoodItem::new("Sayur Asem dan Nasi", 300.0, 8.0, 5.0, 55.0, Balanced),
        FoodItem::new("Capcay", 220.0, 12.0, 9.0, 22.0, Balanced),
    ])
});
