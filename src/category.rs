//! Defines the category registry: named categories, each with a sorted
//! list of subcategories.

use crate::Error;

/// A category and its subcategories.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryEntry {
    /// The unique category name.
    pub name: String,
    /// The subcategories, kept sorted alphabetically.
    pub subcategories: Vec<String>,
}

/// The set of categories transactions can be filed under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryRegistry {
    categories: Vec<CategoryEntry>,
}

impl CategoryRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self {
            categories: Vec::new(),
        }
    }

    /// The stock set of categories a fresh install starts with.
    pub fn with_defaults() -> Self {
        let defaults: [(&str, &[&str]); 17] = [
            (
                "INVESTMENT",
                &["3a Pillar", "3b Pillar", "Cash", "InteractiveBrokers", "Referral"],
            ),
            (
                "TRANSPORTATION",
                &[
                    "Airplane",
                    "Bus/Metro",
                    "Car Rent",
                    "Cycling Rent",
                    "Gasoline",
                    "Parking",
                    "Taxi",
                    "Toll",
                    "Train",
                ],
            ),
            ("GIFT", &["Expence", "Income"]),
            ("SALARY", &["Adesso CH"]),
            ("MAINTENANCE", &["Car", "Car Assurance", "House"]),
            ("HOUSING", &["Airbnb", "Hostel", "Hotel", "MyHome"]),
            ("HEALTH", &["Cassa malati", "Medicine", "Prestazioni Mediche"]),
            (
                "SUBSCRIPTION",
                &[
                    "Amazon Prime",
                    "ChatGPT",
                    "Disney+",
                    "Geforce Now",
                    "GoDaddy",
                    "GoogleOne",
                    "Netflix",
                    "NordVPN",
                    "Photo Editor",
                    "Tinder",
                    "Youtube Premium",
                ],
            ),
            ("INTEREST", &["Bank"]),
            (
                "WELLNESS",
                &[
                    "Gym",
                    "Haircut/Barber",
                    "Laundry",
                    "Personal Care",
                    "Protein",
                    "Spa/Thermes",
                ],
            ),
            (
                "TAXES",
                &[
                    "Deduction",
                    "Document",
                    "Fine",
                    "Liability/household insurance",
                    "TV license fee",
                    "Vehicle tax",
                    "Waste tax",
                ],
            ),
            ("STUDY", &["ArtEmpact", "Book", "Google Cloud"]),
            (
                "ENTERTAINMENT",
                &[
                    "Cinema",
                    "Coffee/Ice-cream",
                    "Disco",
                    "Drink",
                    "Event",
                    "Museum",
                    "Park",
                ],
            ),
            ("RESTAURANT", &["Breakfast", "Brunch", "Dinner", "Lunch"]),
            ("SALES", &["Ebay", "Vinted"]),
            ("TRANSFER", &[]),
            (
                "SHOPPING",
                &["Clothes", "E-cigarette", "Electronics", "Other", "Supermarket"],
            ),
        ];

        let categories = defaults
            .into_iter()
            .map(|(name, subcategories)| CategoryEntry {
                name: name.to_string(),
                subcategories: subcategories.iter().map(|name| name.to_string()).collect(),
            })
            .collect();

        Self { categories }
    }

    /// The categories in registry order.
    pub fn categories(&self) -> &[CategoryEntry] {
        &self.categories
    }

    /// Looks up a category by name.
    pub fn find(&self, name: &str) -> Option<&CategoryEntry> {
        self.categories.iter().find(|category| category.name == name)
    }

    /// Adds a new category with no subcategories.
    ///
    /// # Errors
    ///
    /// Returns [Error::DuplicateCategory] if a category with the same
    /// name already exists.
    pub fn add_category(&mut self, name: &str) -> Result<(), Error> {
        if self.find(name).is_some() {
            return Err(Error::DuplicateCategory(name.to_string()));
        }

        self.categories.push(CategoryEntry {
            name: name.to_string(),
            subcategories: Vec::new(),
        });

        Ok(())
    }

    /// Removes a category and all of its subcategories.
    ///
    /// Existing transactions keep their category string, so reports may
    /// still show the removed name.
    ///
    /// # Errors
    ///
    /// Returns [Error::UnknownCategory] if no category with the given
    /// name exists.
    pub fn remove_category(&mut self, name: &str) -> Result<(), Error> {
        if self.find(name).is_none() {
            return Err(Error::UnknownCategory(name.to_string()));
        }

        self.categories.retain(|category| category.name != name);

        Ok(())
    }

    /// Adds a subcategory to an existing category, keeping the list
    /// sorted.
    ///
    /// # Errors
    ///
    /// Returns [Error::UnknownCategory] if the category does not exist,
    /// or [Error::DuplicateSubcategory] if the subcategory is already
    /// present.
    pub fn add_subcategory(&mut self, category: &str, subcategory: &str) -> Result<(), Error> {
        let entry = self
            .categories
            .iter_mut()
            .find(|entry| entry.name == category)
            .ok_or_else(|| Error::UnknownCategory(category.to_string()))?;

        if entry.subcategories.iter().any(|name| name == subcategory) {
            return Err(Error::DuplicateSubcategory {
                category: category.to_string(),
                subcategory: subcategory.to_string(),
            });
        }

        entry.subcategories.push(subcategory.to_string());
        entry.subcategories.sort();

        Ok(())
    }

    /// Removes a subcategory from a category.
    ///
    /// # Errors
    ///
    /// Returns [Error::UnknownCategory] if the category does not exist.
    pub fn remove_subcategory(&mut self, category: &str, subcategory: &str) -> Result<(), Error> {
        let entry = self
            .categories
            .iter_mut()
            .find(|entry| entry.name == category)
            .ok_or_else(|| Error::UnknownCategory(category.to_string()))?;

        entry.subcategories.retain(|name| name != subcategory);

        Ok(())
    }
}

impl Default for CategoryRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[cfg(test)]
mod category_tests {
    use crate::{Error, category::CategoryRegistry};

    #[test]
    fn defaults_contain_seventeen_categories() {
        let registry = CategoryRegistry::with_defaults();

        assert_eq!(registry.categories().len(), 17);
        assert!(registry.find("TRANSFER").unwrap().subcategories.is_empty());
    }

    #[test]
    fn add_category_rejects_duplicates() {
        let mut registry = CategoryRegistry::with_defaults();

        let result = registry.add_category("SALARY");

        assert_eq!(result, Err(Error::DuplicateCategory("SALARY".to_string())));
    }

    #[test]
    fn add_subcategory_keeps_list_sorted() {
        let mut registry = CategoryRegistry::with_defaults();

        registry
            .add_subcategory("RESTAURANT", "Aperitivo")
            .expect("should add subcategory");

        assert_eq!(
            registry.find("RESTAURANT").unwrap().subcategories,
            vec!["Aperitivo", "Breakfast", "Brunch", "Dinner", "Lunch"]
        );
    }

    #[test]
    fn add_subcategory_rejects_duplicates() {
        let mut registry = CategoryRegistry::with_defaults();

        let result = registry.add_subcategory("RESTAURANT", "Lunch");

        assert_eq!(
            result,
            Err(Error::DuplicateSubcategory {
                category: "RESTAURANT".to_string(),
                subcategory: "Lunch".to_string(),
            })
        );
    }

    #[test]
    fn add_subcategory_requires_existing_category() {
        let mut registry = CategoryRegistry::with_defaults();

        let result = registry.add_subcategory("GHOST", "Nothing");

        assert_eq!(result, Err(Error::UnknownCategory("GHOST".to_string())));
    }

    #[test]
    fn remove_subcategory_leaves_the_rest() {
        let mut registry = CategoryRegistry::with_defaults();

        registry
            .remove_subcategory("SALES", "Ebay")
            .expect("should remove subcategory");

        assert_eq!(registry.find("SALES").unwrap().subcategories, vec!["Vinted"]);
    }

    #[test]
    fn remove_category_deletes_entry() {
        let mut registry = CategoryRegistry::with_defaults();

        registry
            .remove_category("SALES")
            .expect("should remove category");

        assert!(registry.find("SALES").is_none());
        assert_eq!(registry.categories().len(), 16);
    }
}
