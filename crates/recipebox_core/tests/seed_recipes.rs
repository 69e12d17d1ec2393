use recipebox_core::db::open_db_in_memory;
use recipebox_core::seed::{populate, seed_records, SEED_LINK};
use recipebox_core::{
    init_recipes, RecipeListQuery, RecipeRecord, RecipeRepository, SqliteRecipeRepository,
};

#[test]
fn seeding_creates_twelve_records_in_order() {
    let mut conn = open_db_in_memory().unwrap();

    let report = init_recipes(&mut conn).unwrap();
    assert_eq!(report.created, (1..=12).collect::<Vec<i64>>());
    assert!(report.conflicts.is_empty());

    let repo = SqliteRecipeRepository::try_new(&conn).unwrap();
    let recipes = repo.list_recipes(&RecipeListQuery::default()).unwrap();
    assert_eq!(recipes.len(), 12);

    let categories: Vec<_> = recipes.iter().map(|recipe| recipe.category()).collect();
    assert_eq!(
        categories,
        vec![
            "Breakfast",
            "Breakfast",
            "Breakfast",
            "Lunch",
            "Lunch",
            "Lunch",
            "Dinner",
            "Dinner",
            "Dinner",
            "Dessert",
            "Dessert",
            "Dessert",
        ]
    );

    let calories: Vec<_> = recipes.iter().map(|recipe| recipe.calories()).collect();
    assert_eq!(
        calories,
        vec![100, 100, 100, 2000, 2000, 2000, 3000, 3000, 3000, 400, 400, 400]
    );

    assert_eq!(recipes[0].name(), "Avocado Toast");
    assert_eq!(recipes[11].name(), "Custard Pudding");
    assert!(recipes.iter().all(|recipe| recipe.link() == SEED_LINK));
}

#[test]
fn seeding_twice_resets_instead_of_duplicating() {
    let mut conn = open_db_in_memory().unwrap();

    init_recipes(&mut conn).unwrap();
    let report = init_recipes(&mut conn).unwrap();

    assert_eq!(report.created.len(), 12);
    let repo = SqliteRecipeRepository::try_new(&conn).unwrap();
    assert_eq!(repo.count_recipes().unwrap(), 12);
}

#[test]
fn populate_skips_conflicts_and_continues() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteRecipeRepository::try_new(&conn).unwrap();

    let mut existing = RecipeRecord::with_id(2, "Existing", SEED_LINK, "Lunch", 10).unwrap();
    existing.create(&repo).unwrap().unwrap();

    let records = vec![
        RecipeRecord::with_id(1, "Avocado Toast", SEED_LINK, "Breakfast", 100).unwrap(),
        RecipeRecord::with_id(2, "Scrambled Eggs", SEED_LINK, "Breakfast", 100).unwrap(),
        RecipeRecord::with_id(3, "Pancake", SEED_LINK, "Breakfast", 100).unwrap(),
    ];
    let report = populate(&repo, records).unwrap();

    assert_eq!(report.created, vec![1, 3]);
    assert_eq!(report.conflicts, vec!["Scrambled Eggs".to_string()]);
    assert_eq!(repo.count_recipes().unwrap(), 3);
    assert_eq!(repo.get_recipe(2).unwrap().unwrap().name(), "Existing");
}

#[test]
fn seed_records_are_transient_and_valid() {
    let records = seed_records().unwrap();

    assert_eq!(records.len(), 12);
    assert!(records.iter().all(|record| !record.is_persisted()));
    assert!(records.iter().all(|record| record.validate().is_ok()));
}
