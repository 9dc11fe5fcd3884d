diesel::table! {
    sites (id) {
        id -> Integer,
        name -> Text,
        subdomain -> Nullable<Text>,
        custom_domain -> Nullable<Text>,
        created_at -> Timestamp,
    }
}

diesel::table! {
    categories (id) {
        id -> Integer,
        site_id -> Integer,
        parent_id -> Nullable<Integer>,
        slug -> Text,
        title -> Text,
        content -> Nullable<Text>,
        position -> Integer,
        created_at -> Timestamp,
    }
}

diesel::table! {
    category_translations (id) {
        id -> Integer,
        category_id -> Integer,
        lang -> Text,
        title -> Text,
        content -> Nullable<Text>,
    }
}

diesel::table! {
    posts (id) {
        id -> Integer,
        site_id -> Integer,
        category_id -> Nullable<Integer>,
        slug -> Text,
        title -> Text,
        content -> Text,
        image -> Nullable<Text>,
        published -> Bool,
        is_featured -> Bool,
        created_at -> Timestamp,
    }
}

diesel::table! {
    post_translations (id) {
        id -> Integer,
        post_id -> Integer,
        lang -> Text,
        title -> Text,
        content -> Nullable<Text>,
    }
}
