//! Physical schema names
//!
//! Table, constraint and index names created by the migrations in
//! `/migrations`. The migration tests check that every name listed here
//! appears in the SQL, so a rename has to touch both places.

/// Table names
pub mod tables {
    pub const CLAIMS: &str = "claims";
    pub const CUSTOMERS: &str = "customers";
    pub const POLICIES: &str = "policies";
    pub const CUSTOMER_POLICIES: &str = "customer_policies";
}

/// Constraint and index names
pub mod constraints {
    pub const PK_CLAIMS: &str = "pk_claims";
    pub const PK_CUSTOMERS: &str = "pk_customers";
    pub const PK_POLICIES: &str = "pk_policies";
    pub const PK_CUSTOMER_POLICIES: &str = "pk_customer_policies";
    pub const FK_CUSTOMER_POLICIES_CUSTOMERS: &str = "fk_customer_policies_customers_customer_id";
    pub const FK_CUSTOMER_POLICIES_POLICIES: &str = "fk_customer_policies_policies_policy_number";
    pub const IX_CUSTOMER_POLICIES_POLICY_NUMBER: &str = "ix_customer_policies_policy_number";
}

/// Every table, in the order the initial migration creates them
pub const ALL_TABLES: [&str; 4] = [
    tables::CLAIMS,
    tables::CUSTOMERS,
    tables::POLICIES,
    tables::CUSTOMER_POLICIES,
];

/// Every named constraint and index
pub const ALL_CONSTRAINTS: [&str; 7] = [
    constraints::PK_CLAIMS,
    constraints::PK_CUSTOMERS,
    constraints::PK_POLICIES,
    constraints::PK_CUSTOMER_POLICIES,
    constraints::FK_CUSTOMER_POLICIES_CUSTOMERS,
    constraints::FK_CUSTOMER_POLICIES_POLICIES,
    constraints::IX_CUSTOMER_POLICIES_POLICY_NUMBER,
];

/// Returns a readable explanation for a violated constraint
pub fn describe_constraint(name: &str) -> Option<&'static str> {
    match name {
        constraints::PK_CUSTOMER_POLICIES => Some("customer is already linked to this policy"),
        constraints::FK_CUSTOMER_POLICIES_CUSTOMERS => Some("referenced customer does not exist"),
        constraints::FK_CUSTOMER_POLICIES_POLICIES => Some("referenced policy does not exist"),
        constraints::PK_CUSTOMERS => Some("customer id already in use"),
        constraints::PK_POLICIES => Some("policy number already in use"),
        constraints::PK_CLAIMS => Some("claim id already in use"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_table_constraints_are_described() {
        assert!(describe_constraint(constraints::FK_CUSTOMER_POLICIES_CUSTOMERS)
            .unwrap()
            .contains("customer"));
        assert!(describe_constraint(constraints::FK_CUSTOMER_POLICIES_POLICIES)
            .unwrap()
            .contains("policy"));
        assert_eq!(describe_constraint("something_else"), None);
    }

    #[test]
    fn test_join_table_comes_after_both_parents() {
        let position = |table| ALL_TABLES.iter().position(|t| *t == table).unwrap();
        assert!(position(tables::CUSTOMER_POLICIES) > position(tables::CUSTOMERS));
        assert!(position(tables::CUSTOMER_POLICIES) > position(tables::POLICIES));
    }
}
