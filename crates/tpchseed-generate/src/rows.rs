//! Fixed-shape row records for the eight tables, in column order.

use chrono::NaiveDate;

use tpchseed_core::Value;

#[derive(Debug, Clone)]
pub struct Region {
    pub regionkey: i64,
    pub name: String,
    pub comment: String,
}

impl Region {
    pub fn into_values(self) -> Vec<Value> {
        vec![
            Value::Int(self.regionkey),
            Value::Text(self.name),
            Value::Text(self.comment),
        ]
    }
}

#[derive(Debug, Clone)]
pub struct Nation {
    pub nationkey: i64,
    pub name: String,
    pub regionkey: i64,
    pub comment: String,
}

impl Nation {
    pub fn into_values(self) -> Vec<Value> {
        vec![
            Value::Int(self.nationkey),
            Value::Text(self.name),
            Value::Int(self.regionkey),
            Value::Text(self.comment),
        ]
    }
}

#[derive(Debug, Clone)]
pub struct Part {
    pub partkey: i64,
    pub name: String,
    pub mfgr: String,
    pub brand: String,
    pub type_name: String,
    pub size: i64,
    pub container: String,
    pub retailprice: f64,
    pub comment: String,
}

impl Part {
    pub fn into_values(self) -> Vec<Value> {
        vec![
            Value::Int(self.partkey),
            Value::Text(self.name),
            Value::Text(self.mfgr),
            Value::Text(self.brand),
            Value::Text(self.type_name),
            Value::Int(self.size),
            Value::Text(self.container),
            Value::Float(self.retailprice),
            Value::Text(self.comment),
        ]
    }
}

#[derive(Debug, Clone)]
pub struct Supplier {
    pub suppkey: i64,
    pub name: String,
    pub address: String,
    pub nationkey: i64,
    pub phone: String,
    pub acctbal: f64,
    pub comment: String,
}

impl Supplier {
    pub fn into_values(self) -> Vec<Value> {
        vec![
            Value::Int(self.suppkey),
            Value::Text(self.name),
            Value::Text(self.address),
            Value::Int(self.nationkey),
            Value::Text(self.phone),
            Value::Float(self.acctbal),
            Value::Text(self.comment),
        ]
    }
}

#[derive(Debug, Clone)]
pub struct Partsupp {
    pub partkey: i64,
    pub suppkey: i64,
    pub availqty: i64,
    pub supplycost: f64,
    pub comment: String,
}

impl Partsupp {
    pub fn into_values(self) -> Vec<Value> {
        vec![
            Value::Int(self.partkey),
            Value::Int(self.suppkey),
            Value::Int(self.availqty),
            Value::Float(self.supplycost),
            Value::Text(self.comment),
        ]
    }
}

#[derive(Debug, Clone)]
pub struct Customer {
    pub custkey: i64,
    pub name: String,
    pub address: String,
    pub nationkey: i64,
    pub phone: String,
    pub acctbal: f64,
    pub mktsegment: String,
    pub comment: String,
}

impl Customer {
    pub fn into_values(self) -> Vec<Value> {
        vec![
            Value::Int(self.custkey),
            Value::Text(self.name),
            Value::Text(self.address),
            Value::Int(self.nationkey),
            Value::Text(self.phone),
            Value::Float(self.acctbal),
            Value::Text(self.mktsegment),
            Value::Text(self.comment),
        ]
    }
}

#[derive(Debug, Clone)]
pub struct Order {
    pub orderkey: i64,
    pub custkey: i64,
    pub orderstatus: String,
    pub totalprice: f64,
    pub orderdate: NaiveDate,
    pub orderpriority: String,
    pub clerk: String,
    pub shippriority: i64,
    pub comment: String,
}

impl Order {
    pub fn into_values(self) -> Vec<Value> {
        vec![
            Value::Int(self.orderkey),
            Value::Int(self.custkey),
            Value::Text(self.orderstatus),
            Value::Float(self.totalprice),
            Value::Date(self.orderdate),
            Value::Text(self.orderpriority),
            Value::Text(self.clerk),
            Value::Int(self.shippriority),
            Value::Text(self.comment),
        ]
    }
}

#[derive(Debug, Clone)]
pub struct Lineitem {
    pub orderkey: i64,
    pub partkey: i64,
    pub suppkey: i64,
    pub linenumber: i64,
    pub quantity: f64,
    pub extendedprice: f64,
    pub discount: f64,
    pub tax: f64,
    pub returnflag: String,
    pub linestatus: String,
    pub shipdate: NaiveDate,
    pub commitdate: NaiveDate,
    pub receiptdate: NaiveDate,
    pub shipinstruct: String,
    pub shipmode: String,
    pub comment: String,
}

impl Lineitem {
    pub fn into_values(self) -> Vec<Value> {
        vec![
            Value::Int(self.orderkey),
            Value::Int(self.partkey),
            Value::Int(self.suppkey),
            Value::Int(self.linenumber),
            Value::Float(self.quantity),
            Value::Float(self.extendedprice),
            Value::Float(self.discount),
            Value::Float(self.tax),
            Value::Text(self.returnflag),
            Value::Text(self.linestatus),
            Value::Date(self.shipdate),
            Value::Date(self.commitdate),
            Value::Date(self.receiptdate),
            Value::Text(self.shipinstruct),
            Value::Text(self.shipmode),
            Value::Text(self.comment),
        ]
    }
}
