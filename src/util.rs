use hashbrown::HashMap;

fn sign(x: f64) -> f64 {
    if x == 0.0 || x.is_nan() {
        x
    } else {
        x.signum()
    }
}

lazy_static! {
    /// Functions callable from an expression, all taking a single argument.
    pub static ref FUNCTIONS: HashMap<&'static str, fn(f64) -> f64> = {
        let mut map = HashMap::<&'static str, fn(f64) -> f64>::new();
        map.insert("sqrt", f64::sqrt);
        map.insert("cbrt", f64::cbrt);
        map.insert("sin", f64::sin);
        map.insert("cos", f64::cos);
        map.insert("tan", f64::tan);
        map.insert("asin", f64::asin);
        map.insert("acos", f64::acos);
        map.insert("atan", f64::atan);
        map.insert("sinh", f64::sinh);
        map.insert("cosh", f64::cosh);
        map.insert("tanh", f64::tanh);
        map.insert("asinh", f64::asinh);
        map.insert("acosh", f64::acosh);
        map.insert("atanh", f64::atanh);
        map.insert("floor", f64::floor);
        map.insert("ceil", f64::ceil);
        map.insert("round", f64::round);
        map.insert("abs", f64::abs);
        map.insert("sign", sign);
        map.insert("exp", f64::exp);
        map.insert("ln", f64::ln);
        map.insert("log", f64::ln);
        map.insert("log2", f64::log2);
        map.insert("log10", f64::log10);
        map.shrink_to_fit();
        map
    };

    /// Named constants, substituted at parse time.
    pub static ref CONSTANTS: HashMap<&'static str, f64> = {
        let mut map = HashMap::new();
        map.insert("pi", std::f64::consts::PI);
        map.insert("e", std::f64::consts::E);
        map.insert("tau", std::f64::consts::TAU);
        map.insert("phi", 1.618_033_988_749_895);
        map.shrink_to_fit();
        map
    };
}
