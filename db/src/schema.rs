table! {
    game_rounds (id) {
        id -> Int4,
        game_id -> Int4,
        round_id -> Int4,
        round_order -> Int4,
        added_at -> Timestamptz,
    }
}

table! {
    games (id) {
        id -> Int4,
        name -> Varchar,
        game_date -> Date,
        created_by -> Int4,
        is_active -> Bool,
        created_at -> Timestamptz,
    }
}

table! {
    questions (id) {
        id -> Int4,
        round_id -> Int4,
        question_text -> Text,
        answer_text -> Text,
        question_number -> Int4,
        points -> Int4,
    }
}

table! {
    rounds (id) {
        id -> Int4,
        title -> Varchar,
        round_label -> Varchar,
        created_by -> Int4,
        attachment_path -> Nullable<Varchar>,
        is_active -> Bool,
        created_at -> Timestamptz,
    }
}

table! {
    users (id) {
        id -> Int4,
        username -> Varchar,
        email -> Varchar,
        password_hash -> Varchar,
        is_active -> Bool,
        created_at -> Timestamptz,
    }
}

joinable!(game_rounds -> games (game_id));
joinable!(game_rounds -> rounds (round_id));
joinable!(games -> users (created_by));
joinable!(questions -> rounds (round_id));
joinable!(rounds -> users (created_by));

allow_tables_to_appear_in_same_query!(game_rounds, games, questions, rounds, users,);
