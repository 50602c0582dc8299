//! Diesel table definitions matching `backend/migrations`.

diesel::table! {
    users (id) {
        id -> Int4,
        email -> Text,
        password_hash -> Text,
        tier -> Text,
    }
}

diesel::table! {
    capture_results (id) {
        id -> Int8,
        user_id -> Int4,
        image_data -> Bytea,
        object_name -> Text,
        confidence -> Float8,
        description -> Text,
        buy_link -> Nullable<Text>,
    }
}

diesel::allow_tables_to_appear_in_same_query!(users, capture_results);
