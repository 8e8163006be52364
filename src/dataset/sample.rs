use chrono::{NaiveDate, NaiveDateTime};

use super::Dataset;
use crate::model::{
    Agency, ExpenseCategory, ExpenseStatus, ExpenseTransaction, MonthlyRecord, Role, UserProfile,
    Vehicle, VehicleCategory, VehicleStatus,
};

fn agency(id: &str, name: &str, city: &str, address: &str, phone: &str, manager: &str) -> Agency {
    Agency {
        id: id.to_string(),
        name: name.to_string(),
        city: city.to_string(),
        address: Some(address.to_string()),
        phone: Some(phone.to_string()),
        manager: Some(manager.to_string()),
    }
}

#[allow(clippy::too_many_arguments)]
fn vehicle(
    id: &str,
    brand: &str,
    model: &str,
    plate: &str,
    category: VehicleCategory,
    agency_id: &str,
    year: u16,
    status: VehicleStatus,
    daily_rate: f64,
    mileage: u32,
    total_revenue: i64,
    total_rentals: u32,
) -> Vehicle {
    Vehicle {
        id: id.to_string(),
        brand: brand.to_string(),
        model: model.to_string(),
        license_plate: plate.to_string(),
        category,
        agency_id: agency_id.to_string(),
        year,
        status,
        daily_rate,
        mileage,
        total_revenue,
        total_rentals,
    }
}

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("sample dates are valid")
}

fn timestamp(day: u32, hour: u32, minute: u32) -> NaiveDateTime {
    date(2024, 12, day)
        .and_hms_opt(hour, minute, 0)
        .expect("sample times are valid")
}

#[allow(clippy::too_many_arguments)]
fn expense(
    id: &str,
    day: u32,
    category: &str,
    description: &str,
    amount: f64,
    agency_id: &str,
    vehicle_id: Option<&str>,
    created_by: &str,
    status: ExpenseStatus,
) -> ExpenseTransaction {
    ExpenseTransaction {
        id: id.to_string(),
        date: date(2024, 12, day),
        category: category.to_string(),
        description: description.to_string(),
        amount,
        agency_id: agency_id.to_string(),
        vehicle_id: vehicle_id.map(str::to_string),
        created_by: created_by.to_string(),
        status,
    }
}

fn user(
    id: &str,
    name: &str,
    email: &str,
    role: Role,
    agency_id: &str,
    last_login: NaiveDateTime,
) -> UserProfile {
    UserProfile {
        id: id.to_string(),
        name: name.to_string(),
        email: email.to_string(),
        role,
        agency_id: agency_id.to_string(),
        last_login,
    }
}

fn category(name: &str, amount: f64, percentage: f64) -> ExpenseCategory {
    ExpenseCategory {
        name: name.to_string(),
        amount,
        percentage,
    }
}

pub(super) fn build() -> Dataset {
    use ExpenseStatus::{Approved, Pending, Rejected};
    use VehicleCategory::{Berline, Citadine, Premium, Suv, Utilitaire};
    use VehicleStatus::{Available, Maintenance, OutOfService, Rented};

    let agencies = vec![
        agency("paris", "Paris Centre", "Paris", "15 Rue de Rivoli, 75001 Paris", "01 42 36 00 00", "Marie Dupont"),
        agency("lyon", "Lyon Part-Dieu", "Lyon", "3 Place Charles Béraudier, 69003 Lyon", "04 72 10 00 00", "Jean Martin"),
        agency("marseille", "Marseille Vieux-Port", "Marseille", "1 Quai du Port, 13002 Marseille", "04 91 00 00 00", "Sophie Laurent"),
        agency("bordeaux", "Bordeaux Lac", "Bordeaux", "45 Avenue des Quarante Journaux, 33300 Bordeaux", "05 56 00 00 00", "Pierre Moreau"),
        agency("nice", "Nice Aéroport", "Nice", "Terminal 2, Aéroport Nice Côte d'Azur, 06200 Nice", "04 93 00 00 00", "Claire Bernard"),
    ];

    let vehicles = vec![
        vehicle("v1", "Renault", "Clio V", "AB-123-CD", Citadine, "paris", 2023, Rented, 35.0, 24_500, 42_000, 85),
        vehicle("v2", "Peugeot", "308", "EF-456-GH", Berline, "paris", 2023, Available, 55.0, 18_200, 58_000, 72),
        vehicle("v3", "Peugeot", "3008", "IJ-789-KL", Suv, "paris", 2022, Rented, 75.0, 35_600, 89_000, 95),
        vehicle("v4", "Renault", "Kangoo", "MN-012-OP", Utilitaire, "paris", 2022, Maintenance, 45.0, 52_000, 35_000, 60),
        vehicle("v5", "BMW", "Série 3", "QR-345-ST", Premium, "paris", 2024, Available, 120.0, 8_500, 72_000, 45),
        vehicle("v6", "Citroën", "C3", "UV-678-WX", Citadine, "paris", 2023, Rented, 32.0, 28_000, 38_000, 90),
        vehicle("v7", "Renault", "Captur", "YZ-901-AB", Suv, "lyon", 2023, Available, 55.0, 21_000, 52_000, 68),
        vehicle("v8", "Peugeot", "208", "CD-234-EF", Citadine, "lyon", 2023, Rented, 30.0, 19_500, 36_000, 82),
        vehicle("v9", "Volkswagen", "Golf", "GH-567-IJ", Berline, "lyon", 2022, Available, 50.0, 42_000, 61_000, 78),
        vehicle("v10", "Mercedes", "Classe A", "KL-890-MN", Premium, "lyon", 2024, Rented, 110.0, 6_200, 55_000, 35),
        vehicle("v11", "Fiat", "500", "OP-123-QR", Citadine, "marseille", 2023, Available, 28.0, 15_800, 29_000, 75),
        vehicle("v12", "Dacia", "Duster", "ST-456-UV", Suv, "marseille", 2022, Rented, 48.0, 45_000, 48_000, 70),
        vehicle("v13", "Renault", "Master", "WX-789-YZ", Utilitaire, "marseille", 2021, OutOfService, 65.0, 85_000, 42_000, 45),
        vehicle("v14", "Peugeot", "2008", "AB-234-CD", Suv, "bordeaux", 2023, Available, 50.0, 22_000, 44_000, 62),
        vehicle("v15", "Citroën", "Berlingo", "EF-567-GH", Utilitaire, "bordeaux", 2022, Rented, 42.0, 38_000, 32_000, 55),
        vehicle("v16", "Audi", "A3", "IJ-890-KL", Premium, "nice", 2024, Rented, 105.0, 5_500, 68_000, 48),
        vehicle("v17", "Renault", "Twingo", "MN-123-OP", Citadine, "nice", 2023, Available, 25.0, 17_000, 22_000, 65),
        vehicle("v18", "Toyota", "RAV4", "QR-456-ST", Suv, "nice", 2023, Rented, 70.0, 28_000, 62_000, 60),
    ];

    let monthly = vec![
        MonthlyRecord::new(1, 285_000, 198_000, 342),
        MonthlyRecord::new(2, 265_000, 185_000, 318),
        MonthlyRecord::new(3, 312_000, 205_000, 385),
        MonthlyRecord::new(4, 345_000, 218_000, 425),
        MonthlyRecord::new(5, 398_000, 245_000, 487),
        MonthlyRecord::new(6, 425_000, 262_000, 520),
        MonthlyRecord::new(7, 512_000, 298_000, 625),
        MonthlyRecord::new(8, 535_000, 312_000, 652),
        MonthlyRecord::new(9, 445_000, 268_000, 545),
        MonthlyRecord::new(10, 378_000, 235_000, 465),
        MonthlyRecord::new(11, 325_000, 212_000, 398),
        MonthlyRecord::new(12, 358_000, 225_000, 438),
    ];

    let expense_categories = vec![
        category("Carburant", 485_000.0, 18.2),
        category("Maintenance", 412_000.0, 15.5),
        category("Assurances", 378_000.0, 14.2),
        category("Salaires", 625_000.0, 23.5),
        category("Loyers", 285_000.0, 10.7),
        category("Marketing", 158_000.0, 5.9),
        category("Autres", 320_000.0, 12.0),
    ];

    let expenses = vec![
        expense("e1", 15, "Carburant", "Plein de carburant - Clio V", 65.0, "paris", Some("v1"), "Marie Dupont", Approved),
        expense("e2", 14, "Maintenance", "Révision 30 000km - 308", 450.0, "paris", Some("v2"), "Marie Dupont", Approved),
        expense("e3", 13, "Assurances", "Prime assurance mensuelle - Flotte Paris", 2_800.0, "paris", None, "Marie Dupont", Approved),
        expense("e4", 12, "Carburant", "Plein de carburant - Captur", 72.0, "lyon", Some("v7"), "Jean Martin", Approved),
        expense("e5", 11, "Maintenance", "Changement pneus - Duster", 680.0, "marseille", Some("v12"), "Sophie Laurent", Pending),
        expense("e6", 10, "Salaires", "Salaires décembre - Agence Paris", 12_500.0, "paris", None, "Marie Dupont", Approved),
        expense("e7", 9, "Loyers", "Loyer mensuel - Agence Lyon", 3_200.0, "lyon", None, "Jean Martin", Approved),
        expense("e8", 8, "Marketing", "Campagne Google Ads décembre", 1_500.0, "paris", None, "Marie Dupont", Approved),
        expense("e9", 7, "Carburant", "Plein de carburant - A3", 85.0, "nice", Some("v16"), "Claire Bernard", Approved),
        expense("e10", 6, "Maintenance", "Réparation carrosserie - Master", 1_200.0, "marseille", Some("v13"), "Sophie Laurent", Rejected),
        expense("e11", 5, "Autres", "Fournitures bureau - Agence Bordeaux", 180.0, "bordeaux", None, "Pierre Moreau", Approved),
        expense("e12", 4, "Assurances", "Assurance complémentaire - SUVs Nice", 450.0, "nice", None, "Claire Bernard", Pending),
        expense("e13", 3, "Carburant", "Plein de carburant - Golf", 70.0, "lyon", Some("v9"), "Jean Martin", Approved),
        expense("e14", 2, "Salaires", "Salaires décembre - Agence Lyon", 8_500.0, "lyon", None, "Jean Martin", Approved),
        expense("e15", 1, "Loyers", "Loyer mensuel - Agence Marseille", 2_600.0, "marseille", None, "Sophie Laurent", Approved),
    ];

    let users = vec![
        user("u1", "Marie Dupont", "marie.dupont@autoloc.fr", Role::Admin, "paris", timestamp(15, 9, 30)),
        user("u2", "Jean Martin", "jean.martin@autoloc.fr", Role::Manager, "lyon", timestamp(15, 8, 45)),
        user("u3", "Sophie Laurent", "sophie.laurent@autoloc.fr", Role::Manager, "marseille", timestamp(14, 17, 20)),
        user("u4", "Pierre Moreau", "pierre.moreau@autoloc.fr", Role::Manager, "bordeaux", timestamp(15, 10, 0)),
        user("u5", "Claire Bernard", "claire.bernard@autoloc.fr", Role::Manager, "nice", timestamp(14, 16, 30)),
        user("u6", "Luc Petit", "luc.petit@autoloc.fr", Role::Accountant, "paris", timestamp(15, 9, 15)),
        user("u7", "Emma Roux", "emma.roux@autoloc.fr", Role::Viewer, "lyon", timestamp(13, 14, 0)),
        user("u8", "Thomas Girard", "thomas.girard@autoloc.fr", Role::Accountant, "marseille", timestamp(15, 8, 0)),
    ];

    Dataset {
        agencies,
        vehicles,
        monthly,
        expense_categories,
        expenses,
        users,
    }
}
