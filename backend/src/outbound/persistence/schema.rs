//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the database migrations exactly; Diesel uses
//! them for compile-time query validation. Quantities are stored as `BIGINT`
//! and decoded with a non-negativity check in the repository layer.

diesel::table! {
    /// Provisioned user accounts. No registration endpoint writes here.
    usuarios (id) {
        id -> Uuid,
        nome -> Varchar,
        email -> Varchar,
        /// Argon2 PHC string; never leaves the persistence boundary.
        senha -> Varchar,
        /// `ADMIN` or `SETOR`.
        role -> Varchar,
        setor_id -> Nullable<Uuid>,
    }
}

diesel::table! {
    /// Organizational sectors.
    setores (id) {
        id -> Uuid,
        nome -> Varchar,
    }
}

diesel::table! {
    /// Global material catalog shared by every sector.
    materiais (id) {
        id -> Uuid,
        nome -> Varchar,
        unidade -> Varchar,
    }
}

diesel::table! {
    /// Stock ledger; one row per `(setor_id, material_id)` pair.
    estoques (setor_id, material_id) {
        setor_id -> Uuid,
        material_id -> Uuid,
        quantidade -> Int8,
        necessidade -> Int8,
        atualizado_em -> Timestamptz,
    }
}

diesel::joinable!(estoques -> materiais (material_id));
diesel::joinable!(estoques -> setores (setor_id));
diesel::joinable!(usuarios -> setores (setor_id));

diesel::allow_tables_to_appear_in_same_query!(usuarios, setores, materiais, estoques);
