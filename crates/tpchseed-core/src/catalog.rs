use std::fmt;

use serde::{Deserialize, Serialize};

/// The eight TPC-H tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Table {
    Region,
    Nation,
    Part,
    Supplier,
    Partsupp,
    Customer,
    Orders,
    Lineitem,
}

/// Pipeline insert order: every table appears after the tables it
/// references.
pub const INSERT_ORDER: [Table; 8] = [
    Table::Region,
    Table::Nation,
    Table::Part,
    Table::Supplier,
    Table::Partsupp,
    Table::Customer,
    Table::Orders,
    Table::Lineitem,
];

impl Table {
    /// SQL table name.
    pub fn name(&self) -> &'static str {
        match self {
            Table::Region => "region",
            Table::Nation => "nation",
            Table::Part => "part",
            Table::Supplier => "supplier",
            Table::Partsupp => "partsupp",
            Table::Customer => "customer",
            Table::Orders => "orders",
            Table::Lineitem => "lineitem",
        }
    }

    /// Column names in insert order.
    pub fn columns(&self) -> &'static [&'static str] {
        match self {
            Table::Region => &["r_regionkey", "r_name", "r_comment"],
            Table::Nation => &["n_nationkey", "n_name", "n_regionkey", "n_comment"],
            Table::Part => &[
                "p_partkey",
                "p_name",
                "p_mfgr",
                "p_brand",
                "p_type",
                "p_size",
                "p_container",
                "p_retailprice",
                "p_comment",
            ],
            Table::Supplier => &[
                "s_suppkey",
                "s_name",
                "s_address",
                "s_nationkey",
                "s_phone",
                "s_acctbal",
                "s_comment",
            ],
            Table::Partsupp => &[
                "ps_partkey",
                "ps_suppkey",
                "ps_availqty",
                "ps_supplycost",
                "ps_comment",
            ],
            Table::Customer => &[
                "c_custkey",
                "c_name",
                "c_address",
                "c_nationkey",
                "c_phone",
                "c_acctbal",
                "c_mktsegment",
                "c_comment",
            ],
            Table::Orders => &[
                "o_orderkey",
                "o_custkey",
                "o_orderstatus",
                "o_totalprice",
                "o_orderdate",
                "o_orderpriority",
                "o_clerk",
                "o_shippriority",
                "o_comment",
            ],
            Table::Lineitem => &[
                "l_orderkey",
                "l_partkey",
                "l_suppkey",
                "l_linenumber",
                "l_quantity",
                "l_extendedprice",
                "l_discount",
                "l_tax",
                "l_returnflag",
                "l_linestatus",
                "l_shipdate",
                "l_commitdate",
                "l_receiptdate",
                "l_shipinstruct",
                "l_shipmode",
                "l_comment",
            ],
        }
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_order_covers_every_table_once() {
        let mut seen = std::collections::HashSet::new();
        for table in INSERT_ORDER {
            assert!(seen.insert(table), "{table} listed twice");
        }
        assert_eq!(seen.len(), 8);
    }

    #[test]
    fn parents_precede_children() {
        let position = |table: Table| {
            INSERT_ORDER
                .iter()
                .position(|t| *t == table)
                .expect("table in order")
        };
        assert!(position(Table::Region) < position(Table::Nation));
        assert!(position(Table::Nation) < position(Table::Supplier));
        assert!(position(Table::Nation) < position(Table::Customer));
        assert!(position(Table::Part) < position(Table::Partsupp));
        assert!(position(Table::Supplier) < position(Table::Partsupp));
        assert!(position(Table::Customer) < position(Table::Orders));
        assert!(position(Table::Orders) < position(Table::Lineitem));
        assert!(position(Table::Partsupp) < position(Table::Lineitem));
    }

    #[test]
    fn lineitem_has_the_full_column_set() {
        assert_eq!(Table::Lineitem.columns().len(), 16);
        assert_eq!(Table::Lineitem.columns()[3], "l_linenumber");
    }
}
