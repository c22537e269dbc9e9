//! Diesel table definitions for the PostgreSQL schema.
//!
//! These must match the migrations exactly; regenerate with
//! `diesel print-schema` after schema changes.

diesel::table! {
    /// Registered customers.
    users (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Display name.
        name -> Varchar,
        /// Contact number.
        mobile -> Varchar,
        /// Record creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Service providers and their verification state.
    service_providers (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Registered business name.
        business_name -> Varchar,
        /// pending, approved, or rejected.
        verification_status -> Text,
        /// Denormalised mean provider rating.
        total_rating -> Float8,
        /// Number of ratings behind the mean.
        rating_count -> Int4,
        /// Record creation timestamp.
        created_at -> Timestamptz,
        /// Last modification timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Bookable services offered by providers.
    services (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Owning provider.
        provider_id -> Uuid,
        /// Display title.
        title -> Varchar,
        /// Optional image reference.
        image -> Nullable<Varchar>,
        /// Current list price.
        price -> Numeric,
        /// Whether the service is currently offered.
        active -> Bool,
        /// Record creation timestamp.
        created_at -> Timestamptz,
        /// Last modification timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// The booking ledger. A partial unique index over
    /// (service_id, booking_date, booking_time) restricted to active
    /// statuses enforces one active reservation per slot.
    bookings (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Customer who placed the reservation.
        user_id -> Uuid,
        /// Reserved service.
        service_id -> Uuid,
        /// Provider owning the service at creation time.
        provider_id -> Uuid,
        /// Calendar date of the reservation.
        booking_date -> Date,
        /// Time of day of the reservation.
        booking_time -> Time,
        /// Lifecycle status.
        status -> Text,
        /// Price snapshot taken at creation.
        total_amount -> Numeric,
        /// Optional customer notes.
        notes -> Nullable<Text>,
        /// Record creation timestamp.
        created_at -> Timestamptz,
        /// Last modification timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Customer reviews of services.
    service_reviews (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Reviewed service.
        service_id -> Uuid,
        /// Reviewing customer.
        user_id -> Uuid,
        /// Star value, 1 through 5.
        rating -> Int4,
        /// Optional review body.
        review_text -> Nullable<Text>,
        /// When the review was left.
        created_at -> Timestamptz,
    }
}

diesel::joinable!(services -> service_providers (provider_id));
diesel::joinable!(service_reviews -> services (service_id));
diesel::joinable!(service_reviews -> users (user_id));

diesel::allow_tables_to_appear_in_same_query!(
    bookings,
    service_providers,
    service_reviews,
    services,
    users,
);
