pub mod seaorm;

pub use seaorm::SeaOrmOrderedRepository;
