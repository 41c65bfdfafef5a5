mod horoscopes;
mod users;

pub use horoscopes::HoroscopeRepository;
pub use users::UserRepository;
