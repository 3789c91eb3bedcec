pub mod actor;
pub mod id;
pub mod payment;
pub mod report;
pub mod reservation;
pub mod slot;
pub mod user;
pub mod vehicle;

// 金額・時間はファイル上 2 桁で保存されるため、作成時点で丸めておく
pub fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
