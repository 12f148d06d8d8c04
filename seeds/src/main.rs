use dotenv::dotenv;

use db::{
    get_conn,
    models::{Round, User},
    new_pool,
};

fn main() {
    dotenv().ok();

    let pool = new_pool();
    let conn = get_conn(&pool).unwrap();

    let user = User::create(
        &conn,
        "quizmaster".to_string(),
        "quizmaster@example.com".to_string(),
        "changeit",
    )
    .unwrap();

    for (title, label) in &[
        ("General Knowledge", "1"),
        ("History", "2"),
        ("Science and Nature", "3"),
        ("Music", "4"),
        ("Sports", "5"),
        ("Grab Bag", "6"),
    ] {
        Round::create(&conn, title, label.to_string(), user.id, None).unwrap();
    }
}
