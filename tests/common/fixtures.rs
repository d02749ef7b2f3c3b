//! Representative collections for each management screen.
//!
//! The broker roster mirrors the console's seed data; the others are small,
//! hand-picked sets that exercise missing fields, nested owners and the date
//! formats the sort accepts.

use crate::common::builders::records;
use admin_core::Record;
use serde_json::json;

pub fn brokers() -> Vec<Record> {
    records([
        json!({"id": 1, "name": "Rohit Mehta", "email": "rohit.mehta@broker.com", "phone": "+91 98765 12345",
               "status": "Active", "clientsManaged": 15, "bidsSubmitted": 12, "successfulDeals": 5,
               "joinDate": "Jan 10, 2024", "performance": "Excellent"}),
        json!({"id": 2, "name": "Kavita Desai", "email": "kavita.desai@broker.com", "phone": "+91 98765 12346",
               "status": "Active", "clientsManaged": 22, "bidsSubmitted": 18, "successfulDeals": 10,
               "joinDate": "Feb 15, 2024", "performance": "Outstanding"}),
        json!({"id": 3, "name": "Arjun Singh", "email": "arjun.singh@broker.com", "phone": "+91 98765 12347",
               "status": "Active", "clientsManaged": 8, "bidsSubmitted": 6, "successfulDeals": 3,
               "joinDate": "Mar 20, 2024", "performance": "Good"}),
        json!({"id": 4, "name": "Neha Kapoor", "email": "neha.kapoor@broker.com", "phone": "+91 98765 12348",
               "status": "Inactive", "clientsManaged": 5, "bidsSubmitted": 3, "successfulDeals": 1,
               "joinDate": "Apr 01, 2024", "performance": "Average"}),
        json!({"id": 5, "name": "Sandeep Rao", "email": "sandeep.rao@broker.com", "phone": "+91 98765 12349",
               "status": "Active", "clientsManaged": 18, "bidsSubmitted": 14, "successfulDeals": 8,
               "joinDate": "May 05, 2024", "performance": "Excellent"}),
    ])
}

pub fn users() -> Vec<Record> {
    records([
        json!({"id": 11, "name": "Amit Sharma", "email": "amit.sharma@gmail.com", "phone": "9876543210",
               "project": "Skyline Residency", "property": "A-101", "status": "Active",
               "paymentStatus": "Up to Date", "joinDate": "Jan 05, 2024"}),
        json!({"id": 12, "name": "Priya Nair", "email": "priya.nair@yahoo.com", "phone": "9123456780",
               "project": "Greenwood Heights", "property": "B-204", "status": "Active",
               "paymentStatus": "Pending", "joinDate": "2024-03-12"}),
        json!({"id": 13, "name": "Farhan Ali", "email": "farhan.ali@outlook.com", "phone": "9988776655",
               "project": "Skyline Residency", "property": "C-302", "status": "Inactive",
               "paymentStatus": "Overdue", "joinDate": "Feb 28, 2024"}),
        json!({"id": 14, "name": "Sneha Kulkarni", "email": "sneha.k@gmail.com", "phone": "9012345678",
               "project": "Lakeview Towers", "property": "D-110", "status": "Active",
               "paymentStatus": "Up to Date"}),
    ])
}

pub fn suppliers() -> Vec<Record> {
    records([
        json!({"id": 21, "companyName": "BuildMart Supplies", "contactPerson": "Ramesh Gupta",
               "email": "sales@buildmart.in", "phone": "9811122233", "category": "Building Materials",
               "gstNumber": "27AAPFU0939F1ZV", "location": "Pune", "status": "Active",
               "verificationStatus": "Approved", "joinDate": "Jan 15, 2024"}),
        json!({"id": 22, "companyName": "SteelCore Industries", "contactPerson": "Vikram Joshi",
               "email": "orders@steelcore.co.in", "phone": "9822233344", "category": "Steel & Metal",
               "gstNumber": "29ABCDE1234F1Z5", "location": "Bengaluru", "status": "Active",
               "verificationStatus": "Pending", "joinDate": "Mar 03, 2024"}),
        json!({"id": 23, "companyName": "Ultra Cement Co", "contactPerson": "Sunita Rao",
               "email": "contact@ultracement.in", "phone": "9833344455", "category": "Cement & Concrete",
               "gstNumber": null, "location": "Mumbai", "status": "Inactive",
               "verificationStatus": "Pending", "joinDate": "Feb 20, 2024"}),
    ])
}

pub fn properties() -> Vec<Record> {
    records([
        json!({"id": 31, "flatNo": "A-101", "projectName": "Skyline Residency", "location": "Pune",
               "status": "active",
               "users": [{"name": "Amit Sharma", "email": "amit.sharma@gmail.com"},
                         {"name": "Ritu Sharma", "email": "ritu.sharma@gmail.com"}]}),
        json!({"id": 32, "flatNo": "B-204", "projectName": "Greenwood Heights", "location": "Nashik",
               "status": "completed",
               "user": {"name": "Priya Nair", "email": "priya.nair@yahoo.com"}}),
        json!({"id": 33, "flatNo": "C-302", "projectName": "Skyline Residency", "location": "Pune",
               "status": "cancelled", "users": []}),
    ])
}
