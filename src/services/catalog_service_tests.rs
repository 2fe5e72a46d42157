// src/services/catalog_service_tests.rs
//
// Facade tests against a mocked repository port.

#[cfg(test)]
mod facade_tests {
    use std::sync::Arc;

    use mockall::predicate::eq;

    use crate::domain::Product;
    use crate::error::AppError;
    use crate::repositories::MockProductRepository;
    use crate::services::CatalogService;

    fn product(model: &str, color: Option<&str>, rating: f64, price_cents: i64) -> Product {
        Product::new(
            model.to_string(),
            "Hermann Group".to_string(),
            "Furniture".to_string(),
            color.map(str::to_string),
            rating,
            price_cents,
        )
    }

    #[test]
    fn test_overview_combines_repository_aggregates() {
        let mut repo = MockProductRepository::new();

        repo.expect_list_all().times(1).returning(|| {
            Ok(vec![
                product("Sleek Steel Table", None, 62.0, 45900),
                product("Ergonomic Granite Chair", Some("red"), 58.0, 23900),
                product("Mediocre Iron Lamp", None, 35.5, 8900),
            ])
        });
        repo.expect_no_color_count().times(1).returning(|| Ok(2));
        repo.expect_greatest_price()
            .times(1)
            .returning(|| Ok(Some(45900)));

        let service = CatalogService::new(Arc::new(repo));
        let overview = service.overview().unwrap();

        assert_eq!(overview.total_products, 3);
        assert_eq!(overview.missing_color, 2);
        assert_eq!(overview.highest_price_cents, Some(45900));
    }

    #[test]
    fn test_find_by_model_passes_through() {
        let mut repo = MockProductRepository::new();

        repo.expect_find_by_model()
            .with(eq("Sleek Steel Table"))
            .times(1)
            .returning(|_| Ok(product("Sleek Steel Table", None, 62.0, 45900)));

        let service = CatalogService::new(Arc::new(repo));
        let found = service.find_by_model("Sleek Steel Table").unwrap();

        assert_eq!(found.model, "Sleek Steel Table");
    }

    #[test]
    fn test_repository_errors_propagate_unchanged() {
        let mut repo = MockProductRepository::new();

        repo.expect_find_by_model()
            .with(eq("Nonexistent Gadget"))
            .times(1)
            .returning(|_| Err(AppError::NotFound));

        let service = CatalogService::new(Arc::new(repo));
        let result = service.find_by_model("Nonexistent Gadget");

        assert!(matches!(result, Err(AppError::NotFound)));
    }

    #[test]
    fn test_limited_exclusion_forwards_both_arguments() {
        let mut repo = MockProductRepository::new();

        repo.expect_limited_not_in_category()
            .with(eq("Furniture"), eq(2u32))
            .times(1)
            .returning(|_, _| Ok(vec![product("Durable Paper Plane", Some("green"), 91.0, 3500)]));

        let service = CatalogService::new(Arc::new(repo));
        let limited = service.limited_not_in_category("Furniture", 2).unwrap();

        assert_eq!(limited.len(), 1);
    }

    #[test]
    fn test_average_category_rating_passes_through() {
        let mut repo = MockProductRepository::new();

        repo.expect_average_category_rating()
            .with(eq("Furniture"))
            .times(1)
            .returning(|_| Ok(Some(51.833333333333336)));

        let service = CatalogService::new(Arc::new(repo));
        let average = service.average_category_rating("Furniture").unwrap();

        assert_eq!(average, Some(51.833333333333336));
    }
}
