pub mod seaorm;

pub use seaorm::SeaOrmContactInfoRepository;
